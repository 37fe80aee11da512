//! Flat-file line codec for the three record kinds
//!
//! Formats (one record per line):
//!
//! ```text
//! individuals:  id,name,income
//! households:   id,name,member_count,total_income,total_expense,m1[,m2[,m3[,m4]]]
//! transactions: id owner_id category amount date
//! ```
//!
//! Names may not contain commas; amounts are written with two
//! decimals; categories travel as their 1..=5 wire codes; a member id
//! of 0 marks an absent slot and is dropped on parse.

use crate::record::{Category, Household, Individual, Transaction, TxDate};

/// Encodes an individual as one line, without the trailing newline.
pub fn encode_individual(record: &Individual) -> String {
    format!("{},{},{:.2}", record.id, record.name, record.income)
}

/// Parses one individuals line.
pub fn parse_individual(line: &str) -> Result<Individual, String> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != 3 {
        return Err(format!("expected 3 fields, got {}", fields.len()));
    }
    let id = parse_u32(fields[0], "id")?;
    let income: f64 = fields[2]
        .parse()
        .map_err(|_| format!("bad income '{}'", fields[2]))?;
    Individual::new(id, fields[1], income).map_err(|violation| violation.to_string())
}

/// Encodes a household as one line, without the trailing newline.
pub fn encode_household(record: &Household) -> String {
    let mut line = format!(
        "{},{},{},{:.2},{:.2}",
        record.id,
        record.name,
        record.members.len(),
        record.total_income,
        record.total_monthly_expense
    );
    for member in &record.members {
        line.push(',');
        line.push_str(&member.to_string());
    }
    line
}

/// Parses one households line.
///
/// Returns the record plus its raw member ids; the reader resolves
/// those against the identity index, dropping the ones that do not
/// resolve. Aggregates are taken from the line as-is.
pub fn parse_household(line: &str) -> Result<Household, String> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() < 5 {
        return Err(format!("expected at least 5 fields, got {}", fields.len()));
    }
    let id = parse_u32(fields[0], "id")?;
    let member_count: usize = fields[2]
        .parse()
        .map_err(|_| format!("bad member count '{}'", fields[2]))?;
    if member_count == 0 || member_count > crate::record::MAX_MEMBERS {
        return Err(format!("member count {} outside 1..=4", member_count));
    }
    if fields.len() != 5 + member_count {
        return Err(format!(
            "member count {} does not match {} member fields",
            member_count,
            fields.len() - 5
        ));
    }
    let total_income: f64 = fields[3]
        .parse()
        .map_err(|_| format!("bad income '{}'", fields[3]))?;
    let total_expense: f64 = fields[4]
        .parse()
        .map_err(|_| format!("bad expense '{}'", fields[4]))?;

    let mut members = Vec::with_capacity(member_count);
    for field in &fields[5..] {
        let member = parse_u32(field, "member id")?;
        // 0 marks an absent slot.
        if member != 0 {
            members.push(member);
        }
    }

    let mut record = Household::new(id, fields[1], members).map_err(|v| v.to_string())?;
    record.total_income = total_income;
    record.total_monthly_expense = total_expense;
    Ok(record)
}

/// Encodes a transaction as one line, without the trailing newline.
pub fn encode_transaction(record: &Transaction) -> String {
    format!(
        "{} {} {} {:.2} {}",
        record.id,
        record.owner_id,
        record.category.code(),
        record.amount,
        record.date
    )
}

/// Parses one transactions line.
pub fn parse_transaction(line: &str) -> Result<Transaction, String> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 5 {
        return Err(format!("expected 5 fields, got {}", fields.len()));
    }
    let id = parse_u32(fields[0], "id")?;
    let owner_id = parse_u32(fields[1], "owner id")?;
    let code: i64 = fields[2]
        .parse()
        .map_err(|_| format!("bad category code '{}'", fields[2]))?;
    let category = Category::from_code(code).map_err(|v| v.to_string())?;
    let amount: f64 = fields[3]
        .parse()
        .map_err(|_| format!("bad amount '{}'", fields[3]))?;
    let date = TxDate::parse(fields[4]).map_err(|v| v.to_string())?;
    Transaction::new(id, owner_id, category, amount, date).map_err(|v| v.to_string())
}

fn parse_u32(field: &str, what: &str) -> Result<u32, String> {
    field.parse().map_err(|_| format!("bad {} '{}'", what, field))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn individual_round_trip() {
        let record = Individual::new(12, "Alice Smith", 50_000.5).unwrap();
        let line = encode_individual(&record);
        assert_eq!(line, "12,Alice Smith,50000.50");
        let parsed = parse_individual(&line).unwrap();
        assert_eq!(parsed.id, 12);
        assert_eq!(parsed.name, "Alice Smith");
        assert_eq!(parsed.income, 50_000.5);
    }

    #[test]
    fn individual_tolerates_spaced_fields() {
        let parsed = parse_individual("7, Bob, 1200.00").unwrap();
        assert_eq!(parsed.name, "Bob");
    }

    #[test]
    fn household_round_trip() {
        let mut record = Household::new(100, "Smiths", vec![1, 2, 3]).unwrap();
        record.total_income = 90_000.0;
        record.total_monthly_expense = 1_200.0;
        let line = encode_household(&record);
        assert_eq!(line, "100,Smiths,3,90000.00,1200.00,1,2,3");
        let parsed = parse_household(&line).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn household_zero_member_slot_is_absent() {
        let parsed = parse_household("5,Half,2,10.00,0.00,9,0").unwrap();
        assert_eq!(parsed.members, vec![9]);
    }

    #[test]
    fn household_member_count_mismatch_is_malformed() {
        assert!(parse_household("5,Half,3,10.00,0.00,9").is_err());
        assert!(parse_household("5,Half,0,10.00,0.00").is_err());
        assert!(parse_household("5,Half,5,1.0,0.0,1,2,3,4,5").is_err());
    }

    #[test]
    fn transaction_round_trip() {
        let record = Transaction::new(
            3,
            1,
            Category::Grocery,
            200.0,
            TxDate::parse("2024-03-01").unwrap(),
        )
        .unwrap();
        let line = encode_transaction(&record);
        assert_eq!(line, "3 1 3 200.00 2024-03-01");
        let parsed = parse_transaction(&line).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn transaction_bad_fields_are_malformed() {
        assert!(parse_transaction("x 1 3 200.00 2024-03-01").is_err());
        assert!(parse_transaction("3 1 9 200.00 2024-03-01").is_err());
        assert!(parse_transaction("3 1 3 -5.00 2024-03-01").is_err());
        assert!(parse_transaction("3 1 3 200.00 2024-33-01").is_err());
        assert!(parse_transaction("3 1 3 200.00").is_err());
    }
}
