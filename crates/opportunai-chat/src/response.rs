//! Reply text composition.
//!
//! Every reply the assistant can give is built here from catalog records.
//! The wording is Portuguese because the product ships in pt-BR.

use std::fmt::Write;

use opportunai_core::{CompanyRecord, TenderRecord};

use crate::types::{Reply, RuleKind};

// =============================================================================
// Quick-reply labels
// =============================================================================

pub const VIEW_TENDERS: &str = "📋 Ver Editais";
pub const VIEW_COMPANIES: &str = "🏭 Ver Empresas";
pub const SEARCH: &str = "🔍 Buscar";
pub const TOTALS: &str = "📊 Ver Totais";
pub const MENU: &str = "🔙 Menu";
pub const ALL_TENDERS: &str = "📋 Ver Todos Editais";
pub const ALL_COMPANIES: &str = "🏭 Ver Todas Empresas";
pub const DETAILS: [&str; 3] = ["1️⃣ Detalhes #1", "2️⃣ Detalhes #2", "3️⃣ Detalhes #3"];

/// The four entry points offered by the greeting, the menu and the fallback.
pub const ROOT_REPLIES: [&str; 4] = [VIEW_TENDERS, VIEW_COMPANIES, SEARCH, TOTALS];

/// Examples listed by the search prompt.
const SEARCH_EXAMPLES: [&str; 4] = ["segurança", "monitoramento", "química", "mineração"];

// =============================================================================
// Composers
// =============================================================================

pub fn greeting(tender_count: usize, company_count: usize) -> Reply {
    let text = format!(
        "Olá! 👋 Sou o OpportunAI Bot, seu assistente de oportunidades.\n\n\
         Atualmente temos:\n\
         • {} editais disponíveis\n\
         • {} empresas potenciais\n\n\
         O que você gostaria de fazer?",
        tender_count, company_count
    );
    Reply::new(RuleKind::Greeting, text, &ROOT_REPLIES)
}

pub fn tender_list(tenders: &[&TenderRecord]) -> Reply {
    let mut text = String::from("📋 Aqui estão as melhores oportunidades em editais:\n\n");
    for (i, t) in tenders.iter().enumerate() {
        let _ = write!(
            text,
            "{}. {}\n   🏢 {}\n   💰 {}\n   ✅ {}% compatível\n\n",
            i + 1,
            t.title,
            t.issuing_organ,
            t.monetary_value,
            t.compatibility_score
        );
    }
    text.push_str("Digite o número (1-3) para ver mais detalhes ou escolha outra opção:");

    let replies = [DETAILS[0], DETAILS[1], DETAILS[2], VIEW_COMPANIES, MENU];
    Reply::new(RuleKind::ListTenders, text, &replies)
}

pub fn company_list(companies: &[&CompanyRecord]) -> Reply {
    let mut text = String::from("🏭 Aqui estão as melhores empresas potenciais:\n\n");
    for (i, c) in companies.iter().enumerate() {
        let _ = write!(
            text,
            "{}. {}\n   🔧 {}\n   📍 {}\n   ✅ {}% compatível\n\n",
            i + 1,
            c.name,
            c.sector,
            c.location,
            c.compatibility_score
        );
    }
    text.push_str("Digite o número (1-3) para ver mais detalhes ou escolha outra opção:");

    let replies = [DETAILS[0], DETAILS[1], DETAILS[2], VIEW_TENDERS, MENU];
    Reply::new(RuleKind::ListCompanies, text, &replies)
}

pub fn tender_detail(number: u32, t: &TenderRecord) -> Reply {
    let text = format!(
        "📋 Detalhes do Edital #{}:\n\n{}\n\n\
         🏢 Órgão: {}\n\
         💰 Valor: {}\n\
         📍 Local: {}\n\
         📅 Prazo: {}\n\
         ✅ Compatibilidade: {}%\n\
         📝 Status: {}\n\n{}",
        number,
        t.title,
        t.issuing_organ,
        t.monetary_value,
        t.location,
        t.deadline,
        t.compatibility_score,
        t.status.label(),
        t.description.as_deref().unwrap_or_default()
    );
    Reply::new(
        RuleKind::DetailLookup,
        text.trim_end(),
        &[ALL_TENDERS, VIEW_COMPANIES, MENU],
    )
}

pub fn company_detail(number: u32, c: &CompanyRecord) -> Reply {
    let text = format!(
        "🏭 Detalhes da Empresa #{}:\n\n{}\n\n\
         🔧 Setor: {}\n\
         📍 Local: {}\n\
         👥 Funcionários: {}\n\
         💼 Potencial: {}\n\
         ✅ Compatibilidade: {}%\n\n{}",
        number,
        c.name,
        c.sector,
        c.location,
        c.employee_range_label,
        c.potential_tier,
        c.compatibility_score,
        c.description.as_deref().unwrap_or_default()
    );
    Reply::new(
        RuleKind::DetailLookup,
        text.trim_end(),
        &[ALL_COMPANIES, VIEW_TENDERS, MENU],
    )
}

pub fn search_prompt() -> Reply {
    let mut text = String::from("🔍 Digite a palavra-chave que deseja buscar:\n\nExemplos:");
    for example in SEARCH_EXAMPLES {
        let _ = write!(text, "\n• {}", example);
    }
    Reply::new(RuleKind::SearchPrompt, text, &[MENU])
}

/// Compose the keyword search result. Sections with no hits are omitted.
pub fn search_results(tenders: &[&TenderRecord], companies: &[&CompanyRecord]) -> Reply {
    if tenders.is_empty() && companies.is_empty() {
        return Reply::new(
            RuleKind::KeywordSearch,
            "🔍 Não encontrei oportunidades com esses termos.\n\n\
             Tente outras palavras-chave ou escolha uma opção:",
            &[VIEW_TENDERS, VIEW_COMPANIES, MENU],
        );
    }

    let mut text = String::from("🔍 Resultados da busca:\n\n");
    if !tenders.is_empty() {
        text.push_str("📋 Editais encontrados:\n");
        for (i, t) in tenders.iter().enumerate() {
            let score = t.compatibility_score;
            let _ = writeln!(text, "{}. {} ({}% compatível)", i + 1, t.title, score);
        }
        text.push('\n');
    }
    if !companies.is_empty() {
        text.push_str("🏭 Empresas encontradas:\n");
        for (i, c) in companies.iter().enumerate() {
            let score = c.compatibility_score;
            let _ = writeln!(text, "{}. {} ({}% compatível)", i + 1, c.name, score);
        }
    }

    Reply::new(
        RuleKind::KeywordSearch,
        text.trim_end(),
        &[ALL_TENDERS, ALL_COMPANIES, MENU],
    )
}

pub fn totals(tender_count: usize, company_count: usize, high_count: usize) -> Reply {
    let text = format!(
        "📊 Resumo de Oportunidades:\n\n\
         • {} editais disponíveis\n\
         • {} empresas potenciais\n\
         • {} oportunidades de alta compatibilidade\n\n\
         O que você gostaria de explorar?",
        tender_count, company_count, high_count
    );
    Reply::new(RuleKind::Totals, text, &[VIEW_TENDERS, VIEW_COMPANIES, SEARCH])
}

pub fn menu() -> Reply {
    Reply::new(
        RuleKind::Menu,
        "🏠 Menu Principal\n\nEscolha uma opção:",
        &ROOT_REPLIES,
    )
}

pub fn fallback() -> Reply {
    Reply::new(
        RuleKind::Fallback,
        "Entendi! 😊\n\nEscolha uma das opções abaixo:",
        &ROOT_REPLIES,
    )
}

// =============================================================================
// Tests
// =============================================================================
