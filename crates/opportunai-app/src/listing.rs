//! `tenders` and `companies` subcommands.

use std::fmt::Write as _;

use opportunai_core::{Catalog, CompanyRecord, TenderRecord};

use crate::cli::{CompanyArgs, TenderArgs};

pub fn tenders(catalog: &Catalog, args: &TenderArgs) -> serde_json::Result<String> {
    let found = args.filter().apply(catalog.tenders());
    tracing::debug!(matched = found.len(), "Tender filter applied");
    if args.json {
        return serde_json::to_string_pretty(&found);
    }
    Ok(render_tenders(&found))
}

pub fn companies(catalog: &Catalog, args: &CompanyArgs) -> serde_json::Result<String> {
    let found = args.filter().apply(catalog.companies());
    tracing::debug!(matched = found.len(), "Company filter applied");
    if args.json {
        return serde_json::to_string_pretty(&found);
    }
    Ok(render_companies(&found))
}

fn render_tenders(tenders: &[&TenderRecord]) -> String {
    if tenders.is_empty() {
        return "Nenhum edital encontrado.\n".to_string();
    }
    let mut out = format!("{} editais encontrados\n\n", tenders.len());
    for t in tenders {
        let _ = writeln!(out, "#{} {} [{}]", t.id, t.title, t.status);
        let _ = writeln!(out, "   🏢 {}", t.issuing_organ);
        let _ = writeln!(out, "   💰 {}   📅 {}", t.monetary_value, t.deadline);
        let _ = writeln!(out, "   📍 {}   ✅ {}% compatível", t.location, t.compatibility_score);
    }
    out
}

fn render_companies(companies: &[&CompanyRecord]) -> String {
    if companies.is_empty() {
        return "Nenhuma empresa encontrada.\n".to_string();
    }
    let mut out = format!("{} empresas encontradas\n\n", companies.len());
    for c in companies {
        let _ = writeln!(out, "#{} {}", c.id, c.name);
        let _ = writeln!(out, "   🔧 {}   📍 {}", c.sector, c.location);
        let _ = writeln!(
            out,
            "   👥 {}   💼 {}   ✅ {}% compatível",
            c.employee_range_label, c.potential_tier, c.compatibility_score
        );
    }
    out
}
