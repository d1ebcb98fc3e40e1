use anyhow::Result;

fn main() -> Result<()> {
    sonus_cli::main_entry()
}
