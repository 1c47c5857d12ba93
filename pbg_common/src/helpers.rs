/// Split a comma-separated list, dropping blank entries and surrounding whitespace.
pub fn parse_list(value: &str) -> Vec<String> {
    value.split(',').map(str::trim).filter(|s| !s.is_empty()).map(String::from).collect()
}
