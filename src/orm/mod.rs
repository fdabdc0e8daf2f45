pub mod url_checks;
pub mod urls;
