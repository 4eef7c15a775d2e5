use neon_folio::Config;

fn main() -> anyhow::Result<()> {
    neon_folio::run(Config::default())
}
