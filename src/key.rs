/// Declaration keyword a line may start with so the file can also be
/// sourced by a shell.
pub const EXPORT_KEYWORD: &str = "export";

/// Normalize the left-hand side of an assignment into a variable name.
///
/// Strips one leading `export` keyword when it is followed by
/// whitespace, then trims both ends. Never fails.
#[must_use]
pub fn decode_key(raw: &str) -> String {
    let raw = raw.trim_start();
    let name = raw
        .strip_prefix(EXPORT_KEYWORD)
        .filter(|rest| rest.starts_with(char::is_whitespace))
        .unwrap_or(raw);
    name.trim().to_string()
}
