use anyhow::Result;

use super::load;

pub fn config_command(root: Option<&str>) -> Result<()> {
    let (_, cfg) = load(root)?;
    println!("{}", serde_json::to_string_pretty(&cfg)?);
    Ok(())
}
