/// Strips invisible characters that spreadsheet exports leave behind and
/// collapses whitespace. Case is preserved: names are matched as written.
pub(crate) fn clean_name(value: &str) -> String {
    let cleaned = value
        .replace(['\u{feff}', '\u{200b}'], "")
        .replace('\u{00a0}', " ");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}
