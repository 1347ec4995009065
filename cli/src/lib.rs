//! Command-line front end for the studio catalog, contact intake and
//! performance advisor.

pub mod config;
pub mod contact;
pub mod perf;
pub mod projects;

/// Pretty-print `value` as JSON on stdout.
pub fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
