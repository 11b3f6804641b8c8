use super::*;

#[test]
fn parses_extract_command() {
    let cli = Cli::try_parse_from(["zuni", "extract", "https://produto.mercadolivre.com.br/MLB-1"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Extract {
            ref url,
            html_file: None
        } if url == "https://produto.mercadolivre.com.br/MLB-1"
    ));
}

#[test]
fn parses_extract_with_saved_page() {
    let cli = Cli::try_parse_from([
        "zuni",
        "extract",
        "https://produto.mercadolivre.com.br/MLB-1",
        "--html-file",
        "page.html",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Commands::Extract { html_file: Some(ref p), .. } if p == &PathBuf::from("page.html")
    ));
}

#[test]
fn parses_import_dry_run() {
    let cli = Cli::try_parse_from([
        "zuni",
        "import",
        "https://produto.mercadolivre.com.br/MLB-1",
        "--affiliate-url",
        "https://mercadolivre.com/sec/abc",
        "--dry-run",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Commands::Import {
            ref affiliate_url,
            dry_run: true,
            html_file: None,
            ..
        } if affiliate_url == "https://mercadolivre.com/sec/abc"
    ));
}

#[test]
fn import_requires_affiliate_url() {
    let result = Cli::try_parse_from(["zuni", "import", "https://produto.mercadolivre.com.br/MLB-1"]);
    assert!(result.is_err());
}

#[test]
fn parses_affiliate_link() {
    let cli = Cli::try_parse_from(["zuni", "affiliate-link", "MLB123456"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::AffiliateLink { ref item } if item == "MLB123456"
    ));
}

#[test]
fn subcommand_is_required() {
    assert!(Cli::try_parse_from(["zuni"]).is_err());
}
