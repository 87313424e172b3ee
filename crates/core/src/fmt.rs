/// Format an amount with thousands separators: $1,234.56, -$500.00
pub fn money(val: f64, symbol: &str) -> String {
    let negative = val < 0.0 && format!("{:.2}", val.abs()) != "0.00";
    let cents = format!("{:.2}", val.abs());
    let (int_part, dec_part) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut with_commas = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    let with_commas: String = with_commas.chars().rev().collect();

    if negative {
        format!("-{symbol}{with_commas}.{dec_part}")
    } else {
        format!("{symbol}{with_commas}.{dec_part}")
    }
}

/// Like [`money`] but always signed: +$10.00 for income, -$10.00 for expense.
pub fn signed_money(val: f64, symbol: &str) -> String {
    if val < 0.0 {
        money(val, symbol)
    } else {
        format!("+{}", money(val, symbol))
    }
}
