// src/registry.rs
//! Every runnable stage, addressed by `(customer, base, entity)`.

use crate::config::RunOptions;
use crate::error::{Error, Result};
use crate::progress::Progress;
use crate::scrape::{self, RunSummary};

pub type StageFn = fn(&RunOptions, &mut dyn Progress) -> Result<RunSummary>;

pub struct Stage {
    pub customer: &'static str,
    pub base: &'static str,
    pub entity: &'static str,
    pub about: &'static str,
    pub run: StageFn,
}

pub static STAGES: &[Stage] = &[
    // muelles_com
    Stage {
        customer: "muelles_com",
        base: "amisando",
        entity: "provincias",
        about: "province index → provincias.csv",
        run: scrape::amisando::provincias,
    },
    Stage {
        customer: "muelles_com",
        base: "amisando",
        entity: "empresas",
        about: "one province listing → empresas.csv",
        run: scrape::amisando::empresas,
    },
    Stage {
        customer: "muelles_com",
        base: "amisando",
        entity: "websites",
        about: "fichas + contact email → website.csv (resumable)",
        run: scrape::amisando::websites,
    },
    Stage {
        customer: "muelles_com",
        base: "amisando",
        entity: "website-probe",
        about: "first N fichas → website_probe.csv",
        run: scrape::amisando::website_probe,
    },
    // datainnovation_com
    Stage {
        customer: "datainnovation_com",
        base: "comunicare_es",
        entity: "ciudades",
        about: "city index → ciudades.csv",
        run: scrape::comunicare::ciudades,
    },
    Stage {
        customer: "datainnovation_com",
        base: "comunicare_es",
        entity: "empresas",
        about: "agencies per city → empresas.csv",
        run: scrape::comunicare::empresas,
    },
    Stage {
        customer: "datainnovation_com",
        base: "comunicare_es",
        entity: "websites",
        about: "email + phone per agency site → website.csv (resumable)",
        run: scrape::comunicare::websites,
    },
    Stage {
        customer: "datainnovation_com",
        base: "seraportiendasonline_com",
        entity: "categorias",
        about: "home sidebar → categorias.csv",
        run: scrape::seraportiendas::categorias,
    },
    Stage {
        customer: "datainnovation_com",
        base: "seraportiendasonline_com",
        entity: "subcategorias",
        about: "subcategories per category → subcategorias.csv",
        run: scrape::seraportiendas::subcategorias,
    },
    Stage {
        customer: "datainnovation_com",
        base: "seraportiendasonline_com",
        entity: "empresas",
        about: "paginated shop listings → empresas.csv (resumable)",
        run: scrape::seraportiendas::empresas,
    },
    Stage {
        customer: "datainnovation_com",
        base: "seraportiendasonline_com",
        entity: "websites",
        about: "ficha + shop liveness/platform/contact → websites.csv (resumable)",
        run: scrape::seraportiendas::websites,
    },
];

pub fn find(customer: &str, base: &str, entity: &str) -> Result<&'static Stage> {
    STAGES
        .iter()
        .find(|s| s.customer == customer && s.base == base && s.entity == entity)
        .ok_or_else(|| Error::UnknownStage {
            customer: s!(customer),
            base: s!(base),
            entity: s!(entity),
        })
}
