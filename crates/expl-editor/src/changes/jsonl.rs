use super::types::ChangeRecord;

pub fn encode_change_jsonl_line(record: &ChangeRecord) -> serde_json::Result<String> {
    let mut line = serde_json::to_string(record)?;
    line.push('\n');
    Ok(line)
}

pub fn decode_change_jsonl_line(line: &str) -> serde_json::Result<ChangeRecord> {
    serde_json::from_str::<ChangeRecord>(line.trim_end())
}

#[cfg(test)]
#[path = "jsonl_test.rs"]
mod tests;
