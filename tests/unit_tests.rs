//! Unit tests for individual components

mod common;

use axum::http::StatusCode;
use planreader::error::AppError;
use planreader::models::{file_extension, text_preview, ExtractedRecord, ProcessedFile};
use planreader::services::format_router::{
    ensure_min_content, image_mime_type, is_supported_upload, route_document, DocumentRoute,
};
use planreader::services::text_decoder::decode_text;

use common::config_from;

#[test]
fn test_config_defaults() {
    let config = config_from(&[("OPENAI_API_KEY", "sk-test")]).unwrap();

    assert_eq!(config.server_host, "0.0.0.0");
    assert_eq!(config.server_port, 8080);
    assert_eq!(config.max_file_size_mb, 10);
    assert_eq!(config.max_file_size_bytes(), 10 * 1024 * 1024);
    assert_eq!(config.max_concurrent_requests, 100);
    assert_eq!(config.llm.model, "gpt-4o-mini");
    assert_eq!(config.llm.base_url, "https://api.openai.com/v1");
    assert_eq!(config.llm.timeout_seconds, 60);
    assert!((config.llm.temperature - 0.1).abs() < f32::EPSILON);
    assert!(!config.auth_enabled());
}

#[test]
fn test_config_overrides() {
    let config = config_from(&[
        ("OPENAI_API_KEY", "sk-test"),
        ("OPENAI_BASE_URL", "http://localhost:11434/v1/"),
        ("LLM_MODEL", "gpt-4o"),
        ("SERVER_PORT", "9090"),
        ("MAX_FILE_SIZE_MB", "5"),
        ("MAX_CONCURRENT_REQUESTS", "not-a-number"),
        ("VALID_API_KEYS", "valid-key-123, another-key,"),
    ])
    .unwrap();

    assert_eq!(config.llm.base_url, "http://localhost:11434/v1");
    assert_eq!(config.llm.model, "gpt-4o");
    assert_eq!(config.server_port, 9090);
    assert_eq!(config.max_file_size_mb, 5);
    // Unparsable values fall back to the default.
    assert_eq!(config.max_concurrent_requests, 100);

    assert!(config.auth_enabled());
    assert!(config.validate_api_key("valid-key-123"));
    assert!(config.validate_api_key("another-key"));
    assert!(!config.validate_api_key("invalid-key"));
}

#[test]
fn test_config_requires_api_key() {
    assert!(config_from(&[]).is_err());
    assert!(config_from(&[("OPENAI_API_KEY", "   ")]).is_err());
}

#[test]
fn test_config_rejects_zero_limits() {
    assert!(config_from(&[("OPENAI_API_KEY", "sk"), ("MAX_FILE_SIZE_MB", "0")]).is_err());
    assert!(config_from(&[("OPENAI_API_KEY", "sk"), ("LLM_TIMEOUT_SECONDS", "0")]).is_err());
    assert!(config_from(&[("OPENAI_API_KEY", "sk"), ("LLM_TEMPERATURE", "3.5")]).is_err());
}

#[test]
fn test_api_key_not_in_debug_output() {
    let config = config_from(&[
        ("OPENAI_API_KEY", "sk-very-secret"),
        ("VALID_API_KEYS", "client-secret-123,client-secret-456"),
    ])
    .unwrap();
    let rendered = format!("{:?}", config);
    assert!(!rendered.contains("sk-very-secret"));
    assert!(!rendered.contains("client-secret-123"));
    assert!(!rendered.contains("client-secret-456"));
    assert!(rendered.contains("<redacted>"));
    assert!(rendered.contains("<2 redacted>"));
}

#[test]
fn test_error_codes() {
    assert_eq!(AppError::extraction("PDF", "bad xref").error_code(), "EXTRACTION_ERROR");
    assert_eq!(AppError::UnsupportedFormat.error_code(), "UNSUPPORTED_FORMAT");
    assert_eq!(
        AppError::InsufficientContent { format: "PDF", chars: 3, minimum: 30 }.error_code(),
        "INSUFFICIENT_CONTENT"
    );
    assert_eq!(AppError::model_invocation("503").error_code(), "MODEL_INVOCATION_ERROR");
    assert_eq!(AppError::model_response_parse("eof").error_code(), "MODEL_RESPONSE_PARSE_ERROR");
    assert_eq!(AppError::InvalidApiKey.error_code(), "INVALID_API_KEY");
    assert_eq!(AppError::FileTooLarge { size: 20, limit: 10 }.error_code(), "FILE_TOO_LARGE");
}

#[test]
fn test_error_status_codes() {
    assert_eq!(AppError::extraction("DOCX", "zip").status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(AppError::UnsupportedFormat.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(AppError::model_invocation("down").status_code(), StatusCode::BAD_GATEWAY);
    assert_eq!(AppError::model_response_parse("eof").status_code(), StatusCode::BAD_GATEWAY);
    assert_eq!(AppError::InvalidApiKey.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(AppError::RateLimitExceeded.status_code(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(AppError::Timeout.status_code(), StatusCode::REQUEST_TIMEOUT);
    assert_eq!(
        AppError::FileTooLarge { size: 20, limit: 10 }.status_code(),
        StatusCode::PAYLOAD_TOO_LARGE
    );
}

#[test]
fn test_error_provider_fault() {
    assert!(AppError::model_invocation("x").is_provider_fault());
    assert!(AppError::model_response_parse("x").is_provider_fault());
    assert!(!AppError::UnsupportedFormat.is_provider_fault());
    assert!(!AppError::extraction("PDF", "x").is_provider_fault());
}

#[test]
fn test_error_conversions() {
    let app_error: AppError = anyhow::anyhow!("Test error").into();
    match app_error {
        AppError::Internal { message } => assert!(message.contains("Test error")),
        _ => panic!("Expected Internal error"),
    }
}

#[test]
fn test_insufficient_content_message() {
    let error = AppError::InsufficientContent { format: "PDF", chars: 12, minimum: 30 };
    assert_eq!(
        error.to_string(),
        "PDF document is empty or has too little content for analysis (12 characters, minimum 30)"
    );
}

#[test]
fn test_route_by_extension() {
    assert_eq!(route_document(b"", Some("proposta.PDF"), None).unwrap(), DocumentRoute::Pdf);
    assert_eq!(route_document(b"PK", Some("contrato.docx"), None).unwrap(), DocumentRoute::Docx);
    for name in ["a.txt", "a.csv", "a.json", "a.xml", "a.html", "a.htm", "a.md"] {
        assert_eq!(route_document(b"x", Some(name), None).unwrap(), DocumentRoute::Text);
    }
    for name in ["a.png", "a.jpg", "a.jpeg", "a.webp", "a.bmp", "a.tif", "a.tiff"] {
        assert_eq!(route_document(b"x", Some(name), None).unwrap(), DocumentRoute::Image);
    }
}

#[test]
fn test_route_pdf_magic_wins() {
    let bytes = b"%PDF-1.7\n...";
    assert_eq!(route_document(bytes, Some("scan.png"), None).unwrap(), DocumentRoute::Pdf);
    assert_eq!(route_document(bytes, None, None).unwrap(), DocumentRoute::Pdf);
    assert_eq!(route_document(bytes, Some("notes.txt"), None).unwrap(), DocumentRoute::Pdf);
}

#[test]
fn test_route_by_image_content_type() {
    let route = route_document(b"\x89PNG", Some("upload"), Some("image/png")).unwrap();
    assert_eq!(route, DocumentRoute::Image);
    let route = route_document(b"data", None, Some("image/heic")).unwrap();
    assert_eq!(route, DocumentRoute::Image);
}

#[test]
fn test_route_unsupported() {
    assert!(matches!(
        route_document(b"data", Some("planilha.xlsx"), None),
        Err(AppError::UnsupportedFormat)
    ));
    assert!(matches!(
        route_document(b"data", None, Some("application/octet-stream")),
        Err(AppError::UnsupportedFormat)
    ));
    assert!(matches!(route_document(b"", None, None), Err(AppError::UnsupportedFormat)));
}

#[test]
fn test_min_content_guard() {
    let twenty = "a".repeat(20);
    match ensure_min_content(DocumentRoute::Text, &twenty) {
        Err(AppError::InsufficientContent { chars, minimum, .. }) => {
            assert_eq!(chars, 20);
            assert_eq!(minimum, 30);
        }
        other => panic!("Expected InsufficientContent, got {:?}", other),
    }

    let padded = format!("   {}   \n", "b".repeat(29));
    assert!(ensure_min_content(DocumentRoute::Pdf, &padded).is_err());
    assert!(ensure_min_content(DocumentRoute::Pdf, &"ç".repeat(30)).is_ok());
}

#[test]
fn test_upload_allow_list() {
    assert!(is_supported_upload("proposta.pdf", None));
    assert!(is_supported_upload("FOTO.JPEG", None));
    assert!(is_supported_upload("camera-upload", Some("image/jpeg")));
    assert!(!is_supported_upload("planilha.xlsx", None));
    assert!(!is_supported_upload("script.sh", Some("text/x-sh")));
}

#[test]
fn test_image_mime_type() {
    assert_eq!(image_mime_type(b"anything", Some("image/webp")), "image/webp");

    let png_header = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
    assert_eq!(image_mime_type(png_header, Some("application/octet-stream")), "image/png");
    assert_eq!(image_mime_type(b"not an image", None), "image/jpeg");
}

#[test]
fn test_decode_utf8_text() {
    let text = decode_text("Operadora: Sulamérica".as_bytes()).unwrap();
    assert_eq!(text, "Operadora: Sulamérica");
}

#[test]
fn test_decode_latin1_fallback() {
    // "Adesão" in Latin-1 is not valid UTF-8.
    let bytes = b"Ades\xe3o";
    assert_eq!(decode_text(bytes).unwrap(), "Adesão");
}

#[test]
fn test_text_preview_truncation() {
    let short = "x".repeat(500);
    assert_eq!(text_preview(&short), short);

    let long = "é".repeat(501);
    let preview = text_preview(&long);
    assert!(preview.ends_with("..."));
    assert_eq!(preview.chars().count(), 503);
}

#[test]
fn test_record_source_metadata() {
    let text = "y".repeat(750);
    let record = ExtractedRecord::default().with_source_text(&text);
    assert_eq!(record.char_count, 750);
    assert_eq!(record.text_preview, format!("{}...", "y".repeat(500)));

    let record = ExtractedRecord::default().with_image_source();
    assert_eq!(record.char_count, 0);
    assert_eq!(record.text_preview, "Análise visual do documento em imagem");
}

#[test]
fn test_processed_file_extension() {
    let file = ProcessedFile::new("Contrato Social.DOCX".to_string(), bytes::Bytes::from_static(b"PK"))
        .with_mime_type("application/octet-stream".to_string());
    assert_eq!(file.extension(), Some(".docx".to_string()));
    assert_eq!(file.size, 2);
    assert_eq!(file_extension("sem-extensao"), None);
    assert_eq!(file_extension("arquivo."), None);
}
