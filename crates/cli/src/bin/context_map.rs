use anyhow::Result;

fn main() -> Result<()> {
    context_map_cli::main_entry()
}
