use thiserror::Error;

/// Upper bound (exclusive) of the amounts that can be spelled out in words.
pub const WORDS_LIMIT: u64 = 1_000_000_000;

const CURRENCY_SUFFIX: &str = "pesos (COP)";

const UNITS: [&str; 10] = [
  "cero", "uno", "dos", "tres", "cuatro", "cinco", "seis", "siete", "ocho", "nueve",
];

const TEENS: [&str; 9] = [
  "once",
  "doce",
  "trece",
  "catorce",
  "quince",
  "dieciséis",
  "diecisiete",
  "dieciocho",
  "diecinueve",
];

const TENS: [&str; 10] = [
  "", "diez", "veinte", "treinta", "cuarenta", "cincuenta", "sesenta", "setenta", "ochenta",
  "noventa",
];

const HUNDREDS: [&str; 10] = [
  "",
  "ciento",
  "doscientos",
  "trescientos",
  "cuatrocientos",
  "quinientos",
  "seiscientos",
  "setecientos",
  "ochocientos",
  "novecientos",
];

/// Raised when an amount is too large to be written out in words.
///
/// Not fatal: callers fall back to the plain digit string and keep this value
/// around so the degraded output can be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Amount {amount} exceeds the supported range for words (< {limit})", limit = WORDS_LIMIT)]
pub struct UnsupportedMagnitude {
  pub amount: u64,
}

/// An amount spelled out in Spanish with the currency suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountInWords {
  text: String,
  degraded: Option<UnsupportedMagnitude>,
}

impl AmountInWords {
  pub fn text(&self) -> &str {
    &self.text
  }

  pub fn into_text(self) -> String {
    self.text
  }

  /// Set when the amount fell back to digits.
  pub fn degraded(&self) -> Option<UnsupportedMagnitude> {
    self.degraded
  }
}

/// Spanish cardinal words for `n`, e.g. `170000` -> `"ciento setenta mil"`.
pub fn number_to_words(n: u64) -> Result<String, UnsupportedMagnitude> {
  if n >= WORDS_LIMIT {
    return Err(UnsupportedMagnitude { amount: n });
  }
  Ok(match n {
    0 => UNITS[0].to_string(),
    1..=999 => below_thousand(n),
    1_000..=999_999 => thousands(n),
    _ => millions(n),
  })
}

/// Words for a COP amount followed by `"pesos (COP)"`.
///
/// Amounts at or above [`WORDS_LIMIT`] are written as digits and flagged.
pub fn amount_to_words(amount: u64) -> AmountInWords {
  match number_to_words(amount) {
    Ok(words) => AmountInWords {
      text: format!("{} {}", words, CURRENCY_SUFFIX),
      degraded: None,
    },
    Err(unsupported) => AmountInWords {
      text: format!("{} {}", amount, CURRENCY_SUFFIX),
      degraded: Some(unsupported),
    },
  }
}

fn below_hundred(n: u64) -> String {
  let n = n as usize;
  match n {
    0..=9 => UNITS[n].to_string(),
    10 => TENS[1].to_string(),
    11..=19 => TEENS[n - 11].to_string(),
    20 => TENS[2].to_string(),
    21..=29 => format!("veinti{}", UNITS[n - 20]),
    _ if n % 10 == 0 => TENS[n / 10].to_string(),
    _ => format!("{} y {}", TENS[n / 10], UNITS[n % 10]),
  }
}

fn below_thousand(n: u64) -> String {
  if n < 100 {
    return below_hundred(n);
  }
  if n == 100 {
    return "cien".to_string();
  }
  let hundreds = HUNDREDS[(n / 100) as usize];
  match n % 100 {
    0 => hundreds.to_string(),
    rest => format!("{} {}", hundreds, below_hundred(rest)),
  }
}

fn thousands(n: u64) -> String {
  let prefix = match n / 1_000 {
    1 => "mil".to_string(),
    count => format!("{} mil", below_thousand(count)),
  };
  match n % 1_000 {
    0 => prefix,
    rest => format!("{} {}", prefix, below_thousand(rest)),
  }
}

fn millions(n: u64) -> String {
  let prefix = match n / 1_000_000 {
    1 => "un millón".to_string(),
    count => format!("{} millones", below_million(count)),
  };
  match n % 1_000_000 {
    0 => prefix,
    rest => format!("{} {}", prefix, below_million(rest)),
  }
}

fn below_million(n: u64) -> String {
  if n < 1_000 {
    below_thousand(n)
  } else {
    thousands(n)
  }
}
