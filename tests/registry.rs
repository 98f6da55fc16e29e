// tests/registry.rs
use lead_scrape::{Error, registry, runner};

#[test]
fn every_customer_base_has_its_stages() {
    let stages = runner::list_stages();
    assert_eq!(stages.len(), 11);

    let count = |customer: &str, base: &str| {
        stages.iter().filter(|(c, b, _, _)| *c == customer && *b == base).count()
    };
    assert_eq!(count("muelles_com", "amisando"), 4);
    assert_eq!(count("datainnovation_com", "comunicare_es"), 3);
    assert_eq!(count("datainnovation_com", "seraportiendasonline_com"), 4);
}

#[test]
fn find_is_exact() {
    let s = registry::find("muelles_com", "amisando", "website-probe").unwrap();
    assert_eq!(s.entity, "website-probe");

    // entities are not shared across bases
    assert!(registry::find("muelles_com", "amisando", "categorias").is_err());
    // no case folding
    assert!(registry::find("Muelles_com", "amisando", "provincias").is_err());

    match registry::find("acme", "site", "empresas") {
        Err(e @ Error::UnknownStage { .. }) => {
            let msg = e.to_string();
            assert!(msg.contains("acme/site"), "{msg}");
            assert!(msg.contains("empresas"), "{msg}");
        }
        other => panic!("unexpected: {:?}", other.map(|s| s.entity)),
    }
}
