pub mod en_us;

pub use en_us as current;

pub fn fill_one(template: &str, value: impl std::fmt::Display) -> String {
    template.replacen("{}", &value.to_string(), 1)
}

pub fn fill_two(
    template: &str,
    first: impl std::fmt::Display,
    second: impl std::fmt::Display,
) -> String {
    let first_pass = template.replacen("{}", &first.to_string(), 1);
    first_pass.replacen("{}", &second.to_string(), 1)
}

#[cfg(test)]
mod tests {
    use super::{fill_one, fill_two};

    #[test]
    fn templates_fill_in_order() {
        assert_eq!(fill_one("{} views", 42), "42 views");
        assert_eq!(fill_two("Showing {} of {} articles", 6, 9), "Showing 6 of 9 articles");
    }
}
