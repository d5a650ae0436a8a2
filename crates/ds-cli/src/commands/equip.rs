use std::path::Path;

pub fn run(path: &Path, name: &str) -> Result<(), String> {
    let mut record = super::load_record(path)?;

    let item = record
        .find_item(name)
        .ok_or_else(|| format!("no item named '{name}'"))?;
    let (id, item_name) = (item.id, item.name.clone());
    let equipped = record.toggle_equipped(id).map_err(|e| e.to_string())?;

    super::save_record(path, &mut record)?;
    if equipped {
        println!("  Equipped {item_name}");
    } else {
        println!("  Unequipped {item_name}");
    }
    Ok(())
}
