//! Compiled-in opportunity dataset.
//!
//! The catalog never loads records from storage. `Dataset::reference()` is
//! the seed used by the application; tests build smaller fixtures with the
//! same constructors.

use crate::types::{CompanyRecord, TenderRecord, TenderStatus};

/// Immutable seed data for a [`Catalog`](crate::Catalog).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dataset {
    pub tenders: Vec<TenderRecord>,
    pub companies: Vec<CompanyRecord>,
}

impl Dataset {
    /// Create a dataset from explicit record lists.
    pub fn new(tenders: Vec<TenderRecord>, companies: Vec<CompanyRecord>) -> Self {
        Self { tenders, companies }
    }

    /// The reference dataset: 12 tenders and 15 companies.
    #[rustfmt::skip]
    pub fn reference() -> Self {
        use TenderStatus::{Closing, Open};

        let tenders = vec![
            tender(1, "Fornecimento de Equipamentos de Segurança", "Petrobrás - Unidade Santos",
                "R$ 450.000,00", "15/12/2024", "Santos, SP", 95, Open,
                "Licitação para fornecimento de equipamentos de proteção individual e coletiva para operações offshore."),
            tender(2, "Contratação de Serviços de Monitoramento", "Vale S.A. - Minas Gerais",
                "R$ 680.000,00", "20/12/2024", "Belo Horizonte, MG", 88, Open,
                "Serviços de monitoramento ambiental e segurança para operações de mineração."),
            tender(3, "Aquisição de Sistemas de Controle de Acesso", "Governo do Estado de São Paulo",
                "R$ 320.000,00", "10/01/2025", "São Paulo, SP", 82, Open,
                "Sistema integrado de controle de acesso e segurança para prédios públicos."),
            tender(4, "Implementação de Sistema de Gestão Ambiental", "Prefeitura Municipal do Rio de Janeiro",
                "R$ 890.000,00", "05/01/2025", "Rio de Janeiro, RJ", 91, Open,
                "Desenvolvimento e implementação de sistema de gestão ambiental integrado para monitoramento de áreas de preservação."),
            tender(5, "Fornecimento de Equipamentos de Combate a Incêndio", "Corpo de Bombeiros - São Paulo",
                "R$ 275.000,00", "28/12/2024", "São Paulo, SP", 78, Open,
                "Aquisição de equipamentos modernos de combate a incêndio e resgate para unidades da capital."),
            tender(6, "Serviços de Consultoria em Segurança Industrial", "Braskem S.A.",
                "R$ 520.000,00", "18/01/2025", "São Paulo, SP", 93, Open,
                "Consultoria especializada em segurança industrial e prevenção de acidentes para plantas químicas."),
            tender(7, "Instalação de Câmeras de Segurança", "Prefeitura de Belo Horizonte",
                "R$ 180.000,00", "22/12/2024", "Belo Horizonte, MG", 85, Open,
                "Instalação de sistema de videomonitoramento em áreas públicas da cidade."),
            tender(8, "Modernização de Sistema de Alarmes", "Banco Central do Brasil",
                "R$ 650.000,00", "30/01/2025", "Brasília, DF", 72, Open,
                "Atualização completa do sistema de alarmes e detecção de intrusão nas sedes regionais."),
            tender(9, "Treinamento em Segurança do Trabalho", "Embraer S.A.",
                "R$ 95.000,00", "12/12/2024", "São José dos Campos, SP", 68, Closing,
                "Programa de treinamento e capacitação em segurança do trabalho para equipes de produção."),
            tender(10, "Sistema de Controle de Acesso Biométrico", "Tribunal de Justiça de São Paulo",
                "R$ 420.000,00", "25/01/2025", "São Paulo, SP", 89, Open,
                "Implementação de sistema de controle de acesso biométrico em fóruns da capital e região metropolitana."),
            tender(11, "Auditoria de Segurança Cibernética", "Caixa Econômica Federal",
                "R$ 780.000,00", "15/02/2025", "Brasília, DF", 76, Open,
                "Auditoria completa de segurança cibernética e testes de penetração em sistemas críticos."),
            tender(12, "Fornecimento de EPIs para Construção Civil", "Construtora Andrade Gutierrez",
                "R$ 340.000,00", "08/01/2025", "Belo Horizonte, MG", 81, Open,
                "Fornecimento contínuo de equipamentos de proteção individual para obras em andamento."),
        ];

        let companies = vec![
            company(1, "Indústria Química Braskem", "Química e Petroquímica", "São Paulo, SP", 92, "Alto", "5000+",
                "Líder em produção de resinas termoplásticas e produtos químicos básicos."),
            company(2, "Mineradora Brasil S.A.", "Mineração", "Minas Gerais", 87, "Médio-Alto", "2000-5000",
                "Empresa de mineração com foco em extração de minério de ferro e metais preciosos."),
            company(3, "Usina Energética do Nordeste", "Energia", "Recife, PE", 79, "Médio", "1000-2000",
                "Geração e distribuição de energia renovável, com foco em energia eólica e solar."),
            company(4, "Petroquímica Triunfo", "Química e Petroquímica", "Rio Grande do Sul", 88, "Alto", "3000-5000",
                "Produção de produtos petroquímicos básicos e intermediários para indústria nacional."),
            company(5, "Construtora Camargo Corrêa", "Construção Civil", "São Paulo, SP", 84, "Alto", "5000+",
                "Uma das maiores construtoras do Brasil, atuando em infraestrutura e construção pesada."),
            company(6, "Siderúrgica Nacional", "Metalurgia e Siderurgia", "Rio de Janeiro, RJ", 90, "Alto", "5000+",
                "Produção de aço e produtos siderúrgicos para diversos setores industriais."),
            company(7, "Refinaria Petróleo Sul", "Petróleo e Gás", "Santos, SP", 95, "Alto", "2000-5000",
                "Refinaria de petróleo com foco em produtos derivados de alta qualidade."),
            company(8, "Indústria Farmacêutica BioMed", "Farmacêutico", "São Paulo, SP", 73, "Médio", "1000-2000",
                "Desenvolvimento e produção de medicamentos genéricos e de marca."),
            company(9, "Celulose Fibra Brasil", "Papel e Celulose", "Minas Gerais", 81, "Médio-Alto", "2000-5000",
                "Produção de celulose e papel para mercado nacional e exportação."),
            company(10, "Alimentos Processados Nacional", "Alimentos e Bebidas", "São Paulo, SP", 69, "Médio", "3000-5000",
                "Processamento e distribuição de alimentos industrializados em larga escala."),
            company(11, "Tecnologia Industrial Avançada", "Tecnologia", "Campinas, SP", 86, "Alto", "500-1000",
                "Desenvolvimento de soluções tecnológicas para automação industrial e IoT."),
            company(12, "Transportadora LogBrasil", "Logística e Transporte", "Rio de Janeiro, RJ", 77, "Médio-Alto", "1000-2000",
                "Serviços de logística integrada e transporte de cargas pesadas."),
            company(13, "Mineração Ouro Verde", "Mineração", "Goiás", 83, "Médio-Alto", "1000-2000",
                "Extração de ouro e minerais preciosos com tecnologia sustentável."),
            company(14, "Energia Solar Nordeste", "Energia", "Bahia", 75, "Médio", "500-1000",
                "Geração de energia solar fotovoltaica em parques solares de grande porte."),
            company(15, "Indústria Têxtil Moderna", "Têxtil", "Santa Catarina", 71, "Médio", "2000-5000",
                "Produção de tecidos e confecções para mercado nacional e internacional."),
        ];

        Self { tenders, companies }
    }
}

/// Build a tender record with a description.
#[allow(clippy::too_many_arguments)]
pub fn tender(
    id: u32,
    title: &str,
    issuing_organ: &str,
    monetary_value: &str,
    deadline: &str,
    location: &str,
    compatibility_score: u8,
    status: TenderStatus,
    description: &str,
) -> TenderRecord {
    TenderRecord {
        id,
        title: title.to_string(),
        issuing_organ: issuing_organ.to_string(),
        monetary_value: monetary_value.to_string(),
        deadline: deadline.to_string(),
        location: location.to_string(),
        compatibility_score,
        status,
        description: Some(description.to_string()),
    }
}

/// Build a company record with a description.
#[allow(clippy::too_many_arguments)]
pub fn company(
    id: u32,
    name: &str,
    sector: &str,
    location: &str,
    compatibility_score: u8,
    potential_tier: &str,
    employee_range_label: &str,
    description: &str,
) -> CompanyRecord {
    CompanyRecord {
        id,
        name: name.to_string(),
        sector: sector.to_string(),
        location: location.to_string(),
        compatibility_score,
        potential_tier: potential_tier.to_string(),
        employee_range_label: employee_range_label.to_string(),
        description: Some(description.to_string()),
    }
}
