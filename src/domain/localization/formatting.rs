use chrono::{Datelike, NaiveDate};

const MONTHS: [&str; 12] = [
  "enero",
  "febrero",
  "marzo",
  "abril",
  "mayo",
  "junio",
  "julio",
  "agosto",
  "septiembre",
  "octubre",
  "noviembre",
  "diciembre",
];

/// Lower-case Spanish month name for `date`.
pub fn month_name(date: NaiveDate) -> &'static str {
  MONTHS[date.month0() as usize]
}

/// Month name with an upper-case initial ("Enero").
pub fn capitalized_month_name(date: NaiveDate) -> String {
  let name = month_name(date);
  let mut chars = name.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().chain(chars).collect(),
    None => String::new(),
  }
}

/// "15 de diciembre de 2025"
pub fn long_date(date: NaiveDate) -> String {
  format!("{} de {} de {}", date.day(), month_name(date), date.year())
}

/// Thousands grouped with dots: 170000 -> "170.000".
pub fn group_thousands(amount: u64) -> String {
  let digits = amount.to_string();
  let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
  for (i, digit) in digits.chars().enumerate() {
    if i > 0 && (digits.len() - i) % 3 == 0 {
      grouped.push('.');
    }
    grouped.push(digit);
  }
  grouped
}

/// Money as printed on the document: "$.170.000.oo".
pub fn money_mcte(amount: u64) -> String {
  format!("$.{}.oo", group_thousands(amount))
}

/// "Con Fecha de pago el 4 de Enero 2026", or nothing for cash terms.
pub fn due_date_sentence(due_date: Option<NaiveDate>) -> Option<String> {
  due_date.map(|date| {
    format!(
      "Con Fecha de pago el {} de {} {}",
      date.day(),
      capitalized_month_name(date),
      date.year()
    )
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  #[test]
  fn test_group_thousands() {
    assert_eq!(group_thousands(0), "0");
    assert_eq!(group_thousands(999), "999");
    assert_eq!(group_thousands(1000), "1.000");
    assert_eq!(group_thousands(170_000), "170.000");
    assert_eq!(group_thousands(1_234_567), "1.234.567");
  }

  #[test]
  fn test_money_mcte() {
    assert_eq!(money_mcte(170_000), "$.170.000.oo");
  }

  #[test]
  fn test_long_date() {
    assert_eq!(long_date(date(2025, 12, 15)), "15 de diciembre de 2025");
  }

  #[test]
  fn test_due_date_sentence() {
    assert_eq!(
      due_date_sentence(Some(date(2026, 1, 4))).as_deref(),
      Some("Con Fecha de pago el 4 de Enero 2026")
    );
    assert_eq!(due_date_sentence(None), None);
  }
}
