// IPND upload CLI - CSV of service records in, fixed-width upload file out

use anyhow::{bail, Context, Result};
use chrono::Utc;
use serde::Deserialize;
use std::env;
use std::path::Path;

use ipnd_upload::{
    Address, Entity, Entry, IpndFile, Transaction, RECORD_WIDTH, VERSION,
};

// ============================================================================
// INPUT ROW
// ============================================================================

/// One service record from the input CSV
#[derive(Debug, Deserialize)]
struct ServiceRow {
    #[serde(rename = "Public_Number")]
    public_number: String,

    #[serde(rename = "Entity_Type")]
    entity_type: String,

    #[serde(rename = "Name")]
    name: String,

    #[serde(rename = "Title", default)]
    title: String,

    #[serde(rename = "Contact_Number", default)]
    contact_number: String,

    #[serde(rename = "Service_Status")]
    service_status: String,

    #[serde(rename = "Pending", default)]
    pending: String,

    #[serde(rename = "Cancel_Pending", default)]
    cancel_pending: String,

    #[serde(rename = "List_Code", default)]
    list_code: String,

    #[serde(rename = "Type_Of_Service", default)]
    type_of_service: String,

    #[serde(rename = "CSP_Code")]
    csp_code: String,

    #[serde(rename = "DP_Code")]
    dp_code: String,

    #[serde(rename = "Address_Type", default)]
    address_type: String,

    #[serde(rename = "Street_Number", default)]
    street_number: String,

    #[serde(rename = "Street_Name", default)]
    street_name: String,

    #[serde(rename = "Street_Type", default)]
    street_type: String,

    #[serde(rename = "Street_Suffix", default)]
    street_suffix: String,

    #[serde(rename = "Floor", default)]
    floor: String,

    #[serde(rename = "Postcode", default)]
    postcode: String,

    #[serde(rename = "Locality", default)]
    locality: String,

    #[serde(rename = "State", default)]
    state: String,

    #[serde(rename = "Prior_Public_Number", default)]
    prior_public_number: String,
}

// ============================================================================
// ROW -> TRANSACTION
// ============================================================================

fn build_entity(row: &ServiceRow) -> Result<Entity> {
    let mut entity = match row.entity_type.to_uppercase().as_str() {
        "PERSON" => Entity::person(),
        "BUSINESS" => Entity::business(),
        "GOVT" | "GOVERNMENT" => Entity::government(),
        "CHARITY" => Entity::charity(),
        other => bail!("Unknown entity type '{}'", other),
    };

    let title = if row.title.is_empty() {
        None
    } else {
        Some(row.title.as_str())
    };

    entity
        .set_name(&row.name, title)
        .with_context(|| format!("Invalid name for {}", row.public_number))?;
    entity.set_contact_number(&row.contact_number);

    Ok(entity)
}

fn build_address(row: &ServiceRow) -> Result<Address> {
    let mut address = match row.address_type.to_uppercase().as_str() {
        "BUILDING" => Address::building(),
        _ => Address::house(),
    };

    if !row.street_number.is_empty() {
        address
            .set_street_number(&row.street_number)
            .with_context(|| format!("Invalid street number for {}", row.public_number))?;
    }

    if !row.street_name.is_empty() {
        address.set_street_name(&row.street_name, &row.street_type, &row.street_suffix);
    }

    if !row.postcode.is_empty() || !row.locality.is_empty() {
        address.set_locality(&row.postcode, &row.locality, &row.state);
    }

    if !row.floor.is_empty() {
        address
            .set_floor(&row.floor, "FL")
            .with_context(|| format!("Invalid floor for {}", row.public_number))?;
    }

    Ok(address)
}

fn build_transaction(row: &ServiceRow, now: chrono::DateTime<Utc>) -> Result<Transaction> {
    let entity = build_entity(row)?;
    let address = build_address(row)?;

    let mut t = Transaction::new();

    t.insert(Entry::public_number(&row.public_number));
    t.insert(
        Entry::service_status_code(&row.service_status)
            .with_context(|| format!("Invalid service status for {}", row.public_number))?,
    );

    if !row.pending.is_empty() {
        t.insert(Entry::pending_flag(&row.pending));
    }
    if !row.cancel_pending.is_empty() {
        t.insert(Entry::cancel_pending_flag(&row.cancel_pending));
    }
    if !row.list_code.is_empty() {
        t.insert(Entry::list_code(&row.list_code));
    }
    if !row.type_of_service.is_empty() {
        t.insert(Entry::type_of_service(&row.type_of_service));
    }
    if !row.prior_public_number.is_empty() {
        t.insert(Entry::prior_public_number(&row.prior_public_number));
    }

    t.insert(Entry::usage_code(entity.usage_code()));
    t.insert(Entry::customer_name(&entity));
    t.insert(Entry::finding_name(&entity));
    t.insert(Entry::customer_contact(&entity));
    t.insert(Entry::service_address(&address));
    t.insert(Entry::directory_address(&address));
    t.insert(Entry::csp_code(&row.csp_code));
    t.insert(Entry::dp_code(&row.dp_code));
    t.insert(Entry::transaction_date(now));
    t.insert(Entry::service_status_date(now));

    Ok(t)
}

fn load_rows(csv_path: &Path) -> Result<Vec<ServiceRow>> {
    let mut rdr = csv::Reader::from_path(csv_path).context("Failed to open CSV file")?;

    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let row: ServiceRow = result.context("Failed to deserialize service row")?;
        rows.push(row);
    }

    Ok(rows)
}

// ============================================================================
// MODES
// ============================================================================

fn run_generate(args: &[String]) -> Result<()> {
    let [input, output, source, seq] = args else {
        bail!("Usage: ipnd-upload generate <input.csv> <output> <source> <seq>");
    };

    let seq: u32 = seq.parse().context("Sequence must be a number")?;

    println!("📂 Loading {}...", input);
    let rows = load_rows(Path::new(input))?;
    println!("✓ Loaded {} service records", rows.len());

    // One clock read for the whole file - every date leaf agrees
    let now = Utc::now();

    let mut file = IpndFile::new(source, seq, Some(now));
    for row in &rows {
        file.add_transaction(build_transaction(row, now)?);
    }

    let content = file.generate_to_string()?;
    std::fs::write(output, &content).context("Failed to write upload file")?;

    println!(
        "✓ Wrote {} ({} records x {} chars)",
        output,
        rows.len() + 2,
        RECORD_WIDTH
    );

    Ok(())
}

fn run_inspect(args: &[String]) -> Result<()> {
    let [input] = args else {
        bail!("Usage: ipnd-upload inspect <input.csv>");
    };

    let rows = load_rows(Path::new(input))?;
    let now = Utc::now();

    let mut structured = Vec::with_capacity(rows.len());
    for row in &rows {
        structured.push(build_transaction(row, now)?.render_structured()?);
    }

    println!("{}", serde_json::to_string_pretty(&structured)?);

    Ok(())
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("generate") => run_generate(&args[2..]),
        Some("inspect") => run_inspect(&args[2..]),
        _ => {
            eprintln!("ipnd-upload {}", VERSION);
            eprintln!("Usage:");
            eprintln!("  ipnd-upload generate <input.csv> <output> <source> <seq>");
            eprintln!("  ipnd-upload inspect <input.csv>");
            std::process::exit(1);
        }
    }
}
