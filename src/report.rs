const RESET: &str = "\x1b[0m";
const BOLD_YELLOW: &str = "\x1b[1;33m";
const BOLD_GREEN: &str = "\x1b[1;32m";

fn paint(value: u64, color: &str, enabled: bool) -> String {
    if enabled { format!("{color}{value}{RESET}") } else { value.to_string() }
}

pub fn print_error_rate(error_rate: u64, color: bool) {
    println!("Error rate: {}", paint(error_rate, BOLD_YELLOW, color));
}

pub fn print_departure_product(product: u64, color: bool) {
    println!("Product of departure fields: {}", paint(product, BOLD_GREEN, color));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paint_wraps_only_when_enabled() {
        assert_eq!(paint(71, BOLD_YELLOW, false), "71");
        assert_eq!(paint(71, BOLD_YELLOW, true), "\x1b[1;33m71\x1b[0m");
    }
}
