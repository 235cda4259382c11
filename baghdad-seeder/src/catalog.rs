use std::collections::HashMap;

pub const CITY: &str = "Baghdad";

pub const BAGHDAD_AREAS: [&str; 12] = [
    "Mansour",
    "Karada",
    "Adhamiyah",
    "Kadhimiya",
    "Jadriyah",
    "Zayouna",
    "Palestine Street",
    "Dora",
    "Sadr City",
    "Yarmouk",
    "Bab Al Sharqi",
    "Karradat Mariam",
];

/// Restaurants pinned to each area as `(brand, cuisine)`.
pub const AREA_VENDORS: [(&str, &[(&str, &str)]); 12] = [
    (
        "Mansour",
        &[
            ("Route 99", "Burger"),
            ("Pizza Roma", "Pizza"),
            ("Samad Baghdad", "Iraqi"),
            ("Cinnabon", "Dessert"),
            ("Texas Chicken", "Fried Chicken"),
            ("DipnDip", "Dessert"),
            ("Kabab Al Baghdadi", "Kebab"),
        ],
    ),
    (
        "Karada",
        &[
            ("Shawarma Al Reem", "Shawarma"),
            ("Pizza Hut", "Pizza"),
            ("Saj Al Reef", "Iraqi"),
            ("MADO Café", "Dessert"),
            ("Johnny Rockets", "Burger"),
            ("KFC", "Fried Chicken"),
            ("Masgouf House", "BBQ"),
        ],
    ),
    (
        "Adhamiyah",
        &[
            ("Shawarma Time", "Shawarma"),
            ("Little Italy Pizza", "Pizza"),
            ("Al Samadi Sweets", "Dessert"),
            ("Al Baghdadi Restaurant", "Iraqi"),
            ("Crunchy Bite", "Fried Chicken"),
            ("Wok Station", "Sushi"),
        ],
    ),
    (
        "Kadhimiya",
        &[
            ("Kabab Abu Ali", "Kebab"),
            ("Dough House", "Pizza"),
            ("Blue Wave", "Seafood"),
            ("Sushi House", "Sushi"),
            ("Al Reef Grill", "BBQ"),
            ("Café La Roche", "Cafe"),
        ],
    ),
    (
        "Jadriyah",
        &[
            ("Route 99", "Burger"),
            ("Cinnabon", "Dessert"),
            ("Pizza Roma", "Pizza"),
            ("Saj Al Reef", "Iraqi"),
            ("Shawarma Al Reem", "Shawarma"),
            ("Khan Murjan", "Iraqi"),
        ],
    ),
    (
        "Zayouna",
        &[
            ("Shawarma Time", "Shawarma"),
            ("Domino's Pizza", "Pizza"),
            ("Texas Chicken", "Fried Chicken"),
            ("DipnDip", "Dessert"),
            ("Istanbul Shawarma", "Turkish"),
            ("Ocean Fish", "Seafood"),
        ],
    ),
    (
        "Palestine Street",
        &[
            ("Shawarma Palace", "Shawarma"),
            ("Little Italy Pizza", "Pizza"),
            ("Big Bite", "Burger"),
            ("Kabab Al Baghdadi", "Kebab"),
            ("Sushi House", "Sushi"),
            ("Cinnabon", "Dessert"),
        ],
    ),
    (
        "Dora",
        &[
            ("Chicken Time", "Fried Chicken"),
            ("Pizza Hut", "Pizza"),
            ("Al Baghdadi Restaurant", "Iraqi"),
            ("BBQ Nation", "BBQ"),
            ("Blue Wave", "Seafood"),
        ],
    ),
    (
        "Sadr City",
        &[
            ("Shawarma Time", "Shawarma"),
            ("Kabab Abu Ali", "Kebab"),
            ("Route 99", "Burger"),
            ("Dough House", "Pizza"),
            ("KFC", "Fried Chicken"),
        ],
    ),
    (
        "Yarmouk",
        &[
            ("Johnny Rockets", "Burger"),
            ("Pizza Roma", "Pizza"),
            ("Saj Al Reef", "Iraqi"),
            ("Al Samadi Sweets", "Dessert"),
            ("Wok Station", "Sushi"),
        ],
    ),
    (
        "Bab Al Sharqi",
        &[
            ("Shawarma Palace", "Shawarma"),
            ("Slice & Bake", "Pizza"),
            ("Khan Murjan", "Iraqi"),
            ("DipnDip", "Dessert"),
            ("Ocean Fish", "Seafood"),
        ],
    ),
    (
        "Karradat Mariam",
        &[
            ("MADO Café", "Dessert"),
            ("Istanbul Shawarma", "Turkish"),
            ("Al Reef Grill", "BBQ"),
            ("Little Italy Pizza", "Pizza"),
            ("Big Bite", "Burger"),
        ],
    ),
];

#[derive(Debug, Clone, PartialEq)]
pub struct VendorListing {
    pub name: String,
    pub cuisine: &'static str,
    pub area: &'static str,
}

/// One listing per (area, brand) pair. Brands present in more than one area
/// are suffixed with the area so names stay unique.
pub fn vendor_listings() -> Vec<VendorListing> {
    let mut brand_counts: HashMap<&str, usize> = HashMap::new();
    for (_, items) in AREA_VENDORS.iter() {
        for &(brand, _) in items.iter() {
            *brand_counts.entry(brand).or_default() += 1;
        }
    }

    AREA_VENDORS
        .iter()
        .flat_map(|&(area, items)| {
            let brand_counts = &brand_counts;
            items.iter().map(move |&(brand, cuisine)| VendorListing {
                name: if brand_counts[brand] > 1 {
                    format!("{} - {}", brand, area)
                } else {
                    brand.to_string()
                },
                cuisine,
                area,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn every_vendor_area_is_a_known_area() {
        for (area, _) in AREA_VENDORS.iter() {
            assert!(BAGHDAD_AREAS.contains(area), "{} is not listed", area);
        }
    }

    #[test]
    fn vendor_names_are_unique() {
        let listings = vendor_listings();
        let names: HashSet<&str> = listings.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names.len(), listings.len());
        assert_eq!(listings.len(), 69);
    }

    #[test]
    fn shared_brands_get_an_area_suffix() {
        let listings = vendor_listings();
        let names: Vec<&str> = listings.iter().map(|l| l.name.as_str()).collect();

        assert!(names.contains(&"Route 99 - Mansour"));
        assert!(names.contains(&"Route 99 - Sadr City"));
        assert!(!names.contains(&"Route 99"));
        assert!(names.contains(&"Samad Baghdad"));
        assert!(names.contains(&"Slice & Bake"));
    }
}
