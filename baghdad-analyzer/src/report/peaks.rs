use std::collections::BTreeMap;

use crate::dataset::Frame;
use crate::output::Table;

pub const VENDORS_PER_AREA: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct PeakHourRow {
    pub area: String,
    pub hour: u32,
    pub orders: usize,
}

impl Table for PeakHourRow {
    const HEADERS: &'static [&'static str] = &["area", "hour", "orders"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.area.clone(),
            self.hour.to_string(),
            self.orders.to_string(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AreaVendorRow {
    pub area: String,
    pub vendor_name: String,
    pub orders: usize,
}

impl Table for AreaVendorRow {
    const HEADERS: &'static [&'static str] = &["area", "vendor_name", "orders"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.area.clone(),
            self.vendor_name.clone(),
            self.orders.to_string(),
        ]
    }
}

/// The busiest hour of each dropoff area. The earliest hour wins a tie.
pub fn peak_hours(frame: &Frame) -> Vec<PeakHourRow> {
    let mut counts: BTreeMap<&str, BTreeMap<u32, usize>> = BTreeMap::new();
    for order in frame.delivered() {
        *counts
            .entry(order.dropoff_area.as_str())
            .or_default()
            .entry(order.hour)
            .or_default() += 1;
    }

    counts
        .into_iter()
        .filter_map(|(area, hours)| {
            // hours iterate ascending, so only a strictly larger count replaces
            let (hour, orders) = hours
                .into_iter()
                .fold(None, |best: Option<(u32, usize)>, (hour, n)| match best {
                    Some((_, top)) if top >= n => best,
                    _ => Some((hour, n)),
                })?;
            Some(PeakHourRow {
                area: area.to_string(),
                hour,
                orders,
            })
        })
        .collect()
}

/// The most ordered vendors located in each area, ties by vendor name.
pub fn top_vendors_per_area(frame: &Frame) -> Vec<AreaVendorRow> {
    let mut counts: BTreeMap<&str, BTreeMap<&str, usize>> = BTreeMap::new();
    for order in frame.delivered() {
        if let Some(vendor) = order.vendor.as_ref() {
            *counts
                .entry(vendor.area.as_str())
                .or_default()
                .entry(vendor.name.as_str())
                .or_default() += 1;
        }
    }

    let mut rows = Vec::new();
    for (area, vendors) in counts {
        let mut ranked: Vec<(&str, usize)> = vendors.into_iter().collect();
        // names arrive sorted; the stable sort keeps them that way within a count
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        rows.extend(
            ranked
                .into_iter()
                .take(VENDORS_PER_AREA)
                .map(|(name, orders)| AreaVendorRow {
                    area: area.to_string(),
                    vendor_name: name.to_string(),
                    orders,
                }),
        );
    }
    rows
}
