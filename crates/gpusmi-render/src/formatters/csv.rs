use anyhow::Result;
use gpusmi_types::ValueMap;
use serde_json::Value;

/// Render records as header-plus-rows text.
///
/// The header is the first record's key list in insertion order; later
/// records are not reconciled against it. Extra keys are dropped and
/// missing keys leave empty cells. The full text is built in memory so
/// stdout and file destinations emit identical bytes.
pub fn render(records: &[ValueMap]) -> Result<String> {
    // An empty input renders nothing rather than inheriting a crash.
    let Some(first) = records.first().filter(|record| !record.is_empty()) else {
        return Ok(String::new());
    };

    let header: Vec<&str> = first.keys().map(String::as_str).collect();

    let mut buf = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buf);
        writer.write_record(&header)?;
        for record in records {
            let row: Vec<String> = header.iter().map(|key| cell(record.get(*key))).collect();
            writer.write_record(&row)?;
        }
        writer.flush()?;
    }

    Ok(String::from_utf8(buf)?)
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(composite) => composite.to_string(),
    }
}
