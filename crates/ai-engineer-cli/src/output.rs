use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Spell and status messages are markdown; keep a single trailing newline.
pub fn print_message(message: &str) {
    println!("{}", message.trim_end());
}
