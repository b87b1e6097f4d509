pub mod identifier_escaping;
