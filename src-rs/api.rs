pub const API_BASE: &str = "https://getpocket.com/v3";
pub const ISSUE_URL: &str = "https://github.com/readlater-rs/readlater/issues";

pub fn endpoint(path: &str) -> String {
    format!("{}{}", API_BASE, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_and_path() {
        assert_eq!(endpoint("/get"), "https://getpocket.com/v3/get");
    }
}
