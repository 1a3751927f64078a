use sqlmerge_cli::SqlMergeCli;

fn main() -> anyhow::Result<()> {
    SqlMergeCli::new().parse_and_run()
}
