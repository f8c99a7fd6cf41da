//! # Bilingual Synonym Module
//!
//! ## Purpose
//! Precomputed English/Spanish synonym groups for legal document discovery,
//! exposed through a reverse index so that any known term resolves to the
//! full combined expansion set across both languages in O(1).
//!
//! ## Input/Output Specification
//! - **Input**: Lower-cased query tokens
//! - **Output**: The token's full bilingual synonym group, or `None`
//! - **Coverage**: Legal actions, vehicles, business entities, real estate,
//!   employment, financial documents, family matters, service industries
//!
//! The group table is static; the index is built once at startup and shared
//! read-only afterwards.

use std::collections::{HashMap, HashSet};

/// Combined English + Spanish synonym groups. Each row is one group of
/// interchangeable terms; membership in any term implies the whole group.
const SYNONYM_GROUPS: &[&[&str]] = &[
    // Legal actions
    &[
        "buy", "buying", "purchase", "purchasing", "acquire", "acquiring", "obtain", "obtaining",
        "procure", "procuring", "get", "getting", "comprar", "comprando", "compra", "adquirir",
        "adquiriendo", "adquisición", "obtener", "obteniendo", "conseguir", "consiguiendo",
    ],
    &[
        "sell", "selling", "sale", "transfer", "transferring", "convey", "conveying", "dispose",
        "disposing", "assign", "assigning", "vender", "vendiendo", "venta", "transferir",
        "transfiriendo", "transferencia", "traspasar", "traspasando", "ceder", "cediendo",
    ],
    &[
        "rent", "renting", "rental", "lease", "leasing", "let", "letting", "hire", "hiring",
        "tenancy", "occupy", "occupying", "alquilar", "alquilando", "alquiler", "arrendar",
        "arrendando", "arriendo", "rentar", "rentando", "ocupar", "ocupando",
    ],
    &[
        "create", "creating", "establish", "establishing", "form", "forming", "start", "starting",
        "setup", "incorporate", "incorporating", "crear", "creando", "creación", "establecer",
        "estableciendo", "formar", "formando", "iniciar", "iniciando", "constituir",
        "constituyendo",
    ],
    &[
        "employ", "employing", "engagement", "engaging", "recruit", "recruiting", "onboard",
        "onboarding", "contratar", "contratando", "contratación", "emplear", "empleando",
        "reclutar", "reclutando", "incorporar", "incorporando",
    ],
    // Vehicles and transportation
    &[
        "car", "cars", "vehicle", "vehicles", "auto", "autos", "automobile", "automobiles",
        "sedan", "coupe", "suv", "truck", "pickup", "carro", "carros", "coche", "coches",
        "vehículo", "vehículos", "automóvil", "automóviles", "camioneta", "sedán",
    ],
    &[
        "boat", "boats", "vessel", "vessels", "watercraft", "yacht", "yachts", "ship", "ships",
        "marine", "sailboat", "motorboat", "barco", "barcos", "embarcación", "embarcaciones",
        "nave", "naves", "yate", "yates", "lancha", "lanchas", "bote", "botes",
    ],
    &[
        "motorcycle", "motorcycles", "bike", "bikes", "motorbike", "motorbikes", "scooter",
        "scooters", "moped", "mopeds", "motocicleta", "motocicletas", "moto", "motos",
        "ciclomotor", "ciclomotores",
    ],
    // Business entities
    &[
        "business", "businesses", "company", "companies", "corporation", "corporations",
        "enterprise", "enterprises", "firm", "firms", "organization", "organizations", "negocio",
        "negocios", "empresa", "empresas", "corporación", "corporaciones", "compañía",
        "compañías", "organización", "organizaciones",
    ],
    &["llc", "llcs", "srl", "crl"],
    &[
        "partnership", "partnerships", "partner", "partners", "collaboration", "collaborations",
        "sociedad", "sociedades", "socio", "socios", "asociación", "asociaciones", "colaboración",
        "colaboraciones",
    ],
    // Real estate
    &[
        "property", "properties", "realty", "land", "lands", "premises", "estate", "estates",
        "propiedad", "propiedades", "inmueble", "inmuebles", "terreno", "terrenos", "finca",
        "fincas",
    ],
    &[
        "house", "houses", "home", "homes", "residence", "residences", "dwelling", "dwellings",
        "residential", "casa", "casas", "hogar", "hogares", "residencia", "residencias",
        "vivienda", "viviendas", "domicilio", "domicilios",
    ],
    &[
        "apartment", "apartments", "unit", "units", "flat", "flats", "condo", "condos",
        "condominium", "condominiums", "apartamento", "apartamentos", "departamento",
        "departamentos", "piso", "pisos", "condominio", "condominios",
    ],
    // Employment and labor
    &[
        "employee", "employees", "worker", "workers", "staff", "personnel", "empleado",
        "empleados", "trabajador", "trabajadores", "personal",
    ],
    &[
        "contractor", "contractors", "freelancer", "freelancers", "consultant", "consultants",
        "contratista", "contratistas", "consultor", "consultores",
    ],
    &[
        "job", "jobs", "work", "employment", "position", "positions", "role", "roles",
        "occupation", "occupations", "trabajo", "trabajos", "empleo", "empleos", "puesto",
        "puestos", "posición", "posiciones", "ocupación", "ocupaciones",
    ],
    // Financial and legal documents
    &[
        "loan", "loans", "lending", "borrow", "borrowing", "credit", "financing", "advance",
        "advances", "préstamo", "préstamos", "crédito", "créditos", "financiamiento",
        "financiamientos", "adelanto", "adelantos",
    ],
    &[
        "payment", "payments", "pay", "paying", "settlement", "settlements", "installment",
        "installments", "pago", "pagos", "pagar", "pagando", "liquidación", "liquidaciones",
        "cuota", "cuotas", "abono", "abonos",
    ],
    &[
        "contract", "contracts", "agreement", "agreements", "deal", "deals", "arrangement",
        "arrangements", "contrato", "contratos", "acuerdo", "acuerdos", "convenio", "convenios",
        "arreglo", "arreglos",
    ],
    // Family and personal
    &[
        "divorce", "divorces", "separation", "separations", "split", "splits", "dissolution",
        "dissolutions", "divorcio", "divorcios", "separación", "separaciones", "disolución",
        "disoluciones",
    ],
    &[
        "child", "children", "kid", "kids", "minor", "minors", "son", "daughter", "sons",
        "daughters", "niño", "niños", "niña", "niñas", "hijo", "hijos", "hija", "hijas",
        "menor", "menores",
    ],
    &[
        "testament", "testaments", "inheritance", "legacy", "testamento", "testamentos",
        "herencia", "herencias", "legado", "legados",
    ],
    // Services and industries
    &[
        "construction", "building", "builder", "builders", "renovation", "renovations",
        "remodeling", "construcción", "construcciones", "constructor", "constructores",
        "renovación", "renovaciones", "remodelación",
    ],
    &[
        "photography", "photographer", "photographers", "photo", "photos", "picture", "pictures",
        "fotografía", "fotógrafo", "fotógrafos", "foto", "fotos",
    ],
    &[
        "catering", "caterer", "caterers", "banquetes",
    ],
];

/// English + Spanish function words dropped during tokenization.
const STOP_WORDS: &[&str] = &[
    // English
    "a", "an", "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "is", "are", "was", "were", "be", "been", "have", "has", "had", "do", "does", "did", "will",
    "would", "could", "should", "may", "might", "can", "this", "that", "these", "those", "i",
    "you", "he", "she", "it", "we", "they", "me", "him", "her", "us", "them",
    // Spanish
    "el", "la", "los", "las", "un", "una", "unos", "unas", "y", "o", "pero", "en", "por",
    "para", "de", "del", "con", "sin", "es", "son", "fue", "fueron", "ser", "estar", "tener",
    "haber", "hacer", "poder", "deber", "este", "esta", "estos", "estas", "ese", "esa", "esos",
    "esas", "yo", "tú", "él", "ella", "nosotros", "nosotras", "vosotros", "vosotras", "ellos",
    "ellas", "te", "le", "nos", "os", "les",
];

/// Reverse index from every known term to its full bilingual synonym group.
pub struct SynonymIndex {
    term_to_group: HashMap<String, usize>,
    groups: Vec<Vec<String>>,
    stop_words: HashSet<&'static str>,
}

impl SynonymIndex {
    /// Build the reverse index from the static group table.
    pub fn new() -> Self {
        let mut term_to_group = HashMap::new();
        let mut groups = Vec::with_capacity(SYNONYM_GROUPS.len());

        for (group_id, group) in SYNONYM_GROUPS.iter().enumerate() {
            let terms: Vec<String> = group.iter().map(|t| t.to_string()).collect();
            for term in &terms {
                // First group wins if a term appears twice in the table.
                term_to_group.entry(term.clone()).or_insert(group_id);
            }
            groups.push(terms);
        }

        Self {
            term_to_group,
            groups,
            stop_words: STOP_WORDS.iter().copied().collect(),
        }
    }

    /// Full expansion set for a token, if it belongs to any group.
    pub fn expand(&self, token: &str) -> Option<&[String]> {
        self.term_to_group
            .get(token)
            .map(|&group_id| self.groups[group_id].as_slice())
    }

    /// Whether a token is a bilingual function word.
    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(token)
    }

    /// Number of synonym groups in the index.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

impl Default for SynonymIndex {
    fn default() -> Self {
        Self::new()
    }
}
