// src/main.rs

use anyhow::Result;

fn main() -> Result<()> {
    soniq::ui::run()
}
