use std::path::Path;

use ds_mechanics::{long_rest, short_rest};

use super::RestArg;

pub fn run(path: &Path, kind: RestArg) -> Result<(), String> {
    let mut record = super::load_record(path)?;

    let summary = match kind {
        RestArg::Short => short_rest(&mut record),
        RestArg::Long => long_rest(&mut record),
    };
    super::save_record(path, &mut record)?;

    println!("  {summary}");
    println!("  HP {}", record.hit_points);
    Ok(())
}
