//! Solomon VRPTW benchmark file parser
//!
//! Parses the classic Solomon text format: an instance name, a `VEHICLE`
//! section with vehicle count and capacity, and a `CUSTOMER` section with one
//! row per node (`id x y demand ready_time due_date service_time`, all
//! integers). The depot is the row with id 0.

use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::Path;

/// One row of the CUSTOMER section. Field values are integral in the file
/// format but held as `f64` since all downstream arithmetic is real-valued.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: usize,
    pub x: f64,
    pub y: f64,
    pub demand: f64,
    pub ready_time: f64,
    pub due_date: f64,
    pub service_time: f64,
}

/// A parsed Solomon instance, before customer selection.
#[derive(Debug, Clone)]
pub struct SolomonInstance {
    /// Instance name from the first non-empty line (e.g. "C101").
    pub name: String,
    pub num_vehicles: usize,
    pub capacity: f64,
    /// All rows in file order; index 0 is the depot.
    pub customers: Vec<Customer>,
}

/// Parse a Solomon file from disk.
pub fn parse_solomon_file(path: &Path) -> Result<SolomonInstance> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading Solomon file: {}", path.display()))?;
    parse_solomon_str(&content)
}

/// Parse Solomon content from a string.
pub fn parse_solomon_str(content: &str) -> Result<SolomonInstance> {
    let lines: Vec<&str> = content.lines().collect();

    let name = lines
        .iter()
        .map(|l| l.trim())
        .find(|l| !l.is_empty())
        .unwrap_or("")
        .to_string();

    // VEHICLE section: header line, column titles, then "count capacity".
    let vehicle_idx = lines
        .iter()
        .position(|l| l.trim().starts_with("VEHICLE"))
        .ok_or_else(|| anyhow!("missing VEHICLE section"))?;
    let vehicle_row = lines
        .iter()
        .skip(vehicle_idx + 1)
        .map(|l| l.trim())
        .find(|l| !l.is_empty() && l.split_whitespace().count() == 2)
        .ok_or_else(|| anyhow!("missing vehicle count/capacity row"))?;
    let mut fields = vehicle_row.split_whitespace();
    let num_vehicles: usize = fields
        .next()
        .context("missing vehicle count")?
        .parse()
        .context("parsing vehicle count")?;
    let capacity: i64 = fields
        .next()
        .context("missing vehicle capacity")?
        .parse()
        .context("parsing vehicle capacity")?;

    // CUSTOMER section: rows of exactly seven integers; anything else
    // (headers, blank lines, footers) is skipped.
    let customer_idx = lines
        .iter()
        .position(|l| l.trim().starts_with("CUSTOMER"))
        .ok_or_else(|| anyhow!("missing CUSTOMER section"))?;

    let mut customers = Vec::new();
    for line in &lines[customer_idx + 1..] {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 7 {
            continue;
        }
        let values: Vec<i64> = fields
            .iter()
            .map(|f| f.parse::<i64>())
            .collect::<Result<_, _>>()
            .with_context(|| format!("parsing customer row: {}", line.trim()))?;
        customers.push(Customer {
            id: values[0] as usize,
            x: values[1] as f64,
            y: values[2] as f64,
            demand: values[3] as f64,
            ready_time: values[4] as f64,
            due_date: values[5] as f64,
            service_time: values[6] as f64,
        });
    }

    if customers.is_empty() {
        return Err(anyhow!("CUSTOMER section contains no rows"));
    }
    if customers[0].id != 0 {
        return Err(anyhow!(
            "first customer row must be the depot (id 0), got id {}",
            customers[0].id
        ));
    }

    Ok(SolomonInstance {
        name,
        num_vehicles,
        capacity: capacity as f64,
        customers,
    })
}

/// Select the depot plus the first `n_customers` customer rows and append a
/// synthetic end depot with id `n_customers + 1` copying the depot
/// attributes. The result has exactly `n_customers + 2` rows in node order.
pub fn select_customers(instance: &SolomonInstance, n_customers: usize) -> Result<Vec<Customer>> {
    if instance.customers.len() < n_customers + 1 {
        return Err(anyhow!(
            "instance has {} customers, requested {}",
            instance.customers.len() - 1,
            n_customers
        ));
    }
    let mut selected: Vec<Customer> = instance.customers[..n_customers + 1].to_vec();
    let mut end_depot = selected[0].clone();
    end_depot.id = n_customers + 1;
    selected.push(end_depot);
    Ok(selected)
}
