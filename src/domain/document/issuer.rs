use serde::Deserialize;

/// Fixed text printed on every document on behalf of the issuer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IssuerProfile {
  pub name: String,
  pub rut: String,
  pub cc: String,
  pub role: String,
  pub brand: String,
  /// Payment instructions. Each entry is wrapped as its own paragraph.
  #[serde(default)]
  pub bank_lines: Vec<String>,
  #[serde(default = "default_city")]
  pub city: String,
  #[serde(default)]
  pub footer_lines: Vec<String>,
}

fn default_city() -> String {
  "Bogotá D.C.".to_string()
}

#[cfg(test)]
impl IssuerProfile {
  pub(crate) fn sample() -> Self {
    Self {
      name: "ANA MARÍA RÍOS PEÑA".to_string(),
      rut: "RUT No.900.000.001-1".to_string(),
      cc: "C.C.No.52.000.001 de Bogotá".to_string(),
      role: "Gerente Comercial".to_string(),
      brand: "CAFÉ DEL ALTO".to_string(),
      bank_lines: vec![
        "Agradezco por favor consignar el valor referido a órdenes de la cuenta de ahorros No. 00000000000. Con el banco Ejemplo.".to_string(),
      ],
      city: default_city(),
      footer_lines: vec![
        "Calle 1 No.2 - 3".to_string(),
        "300 000 00 00".to_string(),
        "contacto@cafedelalto.example".to_string(),
      ],
    }
  }
}
