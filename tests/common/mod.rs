//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::io::{Cursor, Write};
use std::sync::{Arc, Mutex};

use planreader::config::Config;
use planreader::error::{AppError, AppResult};
use planreader::services::{
    AnalysisSettings, ChatModel, CompletionReply, CompletionRequest, DocumentPipeline,
};

/// Replies with a canned string and remembers every request it saw.
pub struct RecordingModel {
    reply: Result<String, String>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl RecordingModel {
    pub fn replying(reply: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(reply.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn replying_json(value: Value) -> Arc<Self> {
        Self::replying(value.to_string())
    }

    pub fn failing(message: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(message.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ChatModel for RecordingModel {
    async fn complete(&self, request: CompletionRequest) -> AppResult<CompletionReply> {
        self.requests.lock().unwrap().push(request);
        match &self.reply {
            Ok(content) => Ok(CompletionReply {
                content: content.clone(),
            }),
            Err(message) => Err(AppError::model_invocation(message.clone())),
        }
    }
}

pub fn settings() -> AnalysisSettings {
    AnalysisSettings {
        model: "gpt-4o-mini".to_string(),
        temperature: 0.1,
    }
}

pub fn pipeline_with(model: Arc<RecordingModel>) -> DocumentPipeline {
    DocumentPipeline::new(model, settings())
}

pub fn sample_reply() -> Value {
    json!({
        "idades": [34, 29, 5],
        "operadora": "amil",
        "valor_atual": "1500,75",
        "tipo_plano": "pme",
        "nome_beneficiarios": ["Maria Silva", "João Silva", "Ana Silva"],
        "socios_detectados": [],
        "total_socios": null,
        "observacoes": "Plano com coparticipação"
    })
}

pub fn config_from(pairs: &[(&str, &str)]) -> anyhow::Result<Config> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|key| vars.get(key).cloned())
}

pub fn test_config() -> Config {
    config_from(&[("OPENAI_API_KEY", "sk-test")]).unwrap()
}

/// Single-page PDF per line of text, Helvetica, one `Tj` per line.
pub fn pdf_with_pages(pages: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

/// Minimal DOCX archive whose main part holds the given body XML.
pub fn docx_with_body(body_xml: &str) -> Vec<u8> {
    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
        body_xml
    );
    zip_with_entries(&[("word/document.xml", document.as_str())])
}

pub fn zip_with_entries(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    {
        let mut zip = zip::ZipWriter::new(&mut buffer);
        let options = zip::write::SimpleFileOptions::default();
        for (name, content) in entries {
            zip.start_file(*name, options).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
    }
    buffer.into_inner()
}

pub fn paragraph(runs: &[&str]) -> String {
    let runs: String = runs
        .iter()
        .map(|text| format!(r#"<w:r><w:t xml:space="preserve">{}</w:t></w:r>"#, text))
        .collect();
    format!("<w:p>{}</w:p>", runs)
}
