use std::path::Path;

use ds_core::Coins;

use super::CoinAction;

pub fn run(path: &Path, action: CoinAction) -> Result<(), String> {
    let mut record = super::load_record(path)?;

    match action {
        CoinAction::Show => {
            println!("  {}", record.coins);
            println!(
                "  worth {} gp, weighing {:.2} lb",
                record.coins.total_copper() as f64 / 100.0,
                record.coins.weight()
            );
            return Ok(());
        }
        CoinAction::Add { amount } => {
            let coins = Coins::parse(&amount).map_err(|e| e.to_string())?;
            record.coins.add(&coins);
        }
        CoinAction::Remove { amount } => {
            let coins = Coins::parse(&amount).map_err(|e| e.to_string())?;
            record.coins.remove(&coins).map_err(|e| e.to_string())?;
        }
        CoinAction::Consolidate => record.coins.consolidate(),
    }

    super::save_record(path, &mut record)?;
    println!("  {}", record.coins);
    Ok(())
}
