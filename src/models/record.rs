//! The normalized result of analysing one document.

use serde::{Deserialize, Serialize};

pub const CONFIDENCE_HIGH: &str = "alta";
pub const IMAGE_PREVIEW_PLACEHOLDER: &str = "Análise visual do documento em imagem";
pub const PREVIEW_CHARS: usize = 500;

/// Contracting category of a health plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PlanType {
    Adesao,
    Pme,
    Empresarial,
}

impl PlanType {
    /// Exact match against the upper-case literals.
    pub fn from_literal(value: &str) -> Option<Self> {
        match value {
            "ADESAO" => Some(PlanType::Adesao),
            "PME" => Some(PlanType::Pme),
            "EMPRESARIAL" => Some(PlanType::Empresarial),
            _ => None,
        }
    }
}

/// Serialized with the field names clients of the service already consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedRecord {
    #[serde(rename = "idades")]
    pub ages: Vec<u32>,
    #[serde(rename = "operadora")]
    pub carrier: Option<String>,
    #[serde(rename = "valor_atual")]
    pub plan_value: Option<f64>,
    #[serde(rename = "tipo_plano")]
    pub plan_type: Option<PlanType>,
    #[serde(rename = "nome_beneficiarios")]
    pub beneficiary_names: Vec<String>,
    #[serde(rename = "socios_detectados")]
    pub detected_partners: Vec<String>,
    #[serde(rename = "total_socios")]
    pub partner_count: Option<u32>,
    #[serde(rename = "observacoes")]
    pub notes: Option<String>,
    #[serde(rename = "confianca")]
    pub confidence: String,
    #[serde(rename = "texto_extraido_preview")]
    pub text_preview: String,
    #[serde(rename = "total_caracteres")]
    pub char_count: usize,
}

impl Default for ExtractedRecord {
    fn default() -> Self {
        Self {
            ages: Vec::new(),
            carrier: None,
            plan_value: None,
            plan_type: None,
            beneficiary_names: Vec::new(),
            detected_partners: Vec::new(),
            partner_count: None,
            notes: None,
            confidence: CONFIDENCE_HIGH.to_string(),
            text_preview: String::new(),
            char_count: 0,
        }
    }
}

impl ExtractedRecord {
    /// Attaches the preview and character count of the text the model read.
    pub fn with_source_text(mut self, text: &str) -> Self {
        self.text_preview = text_preview(text);
        self.char_count = text.chars().count();
        self
    }

    pub fn with_image_source(mut self) -> Self {
        self.text_preview = IMAGE_PREVIEW_PLACEHOLDER.to_string();
        self.char_count = 0;
        self
    }
}

pub fn text_preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
