//! Instructions sent to the model. The JSON keys named here are the keys the
//! normalizer reads back.

pub const TEXT_SYSTEM_PROMPT: &str = "Você é um assistente especializado em extrair dados estruturados de documentos de planos de saúde. Sempre retorne JSON válido.";

pub const IMAGE_SYSTEM_PROMPT: &str = "Você é um assistente especializado em extrair dados de documentos de planos de saúde a partir de imagens. Sempre retorne JSON válido.";

pub const IMAGE_PROMPT: &str = "Analise esta imagem de um documento de plano de saúde e extraia um JSON com os campos: \
idades (lista de inteiros), operadora (string em maiúsculas), valor_atual (float), \
tipo_plano (ADESAO, PME, EMPRESARIAL ou null), nome_beneficiarios (lista de strings), \
socios_detectados (lista de strings), total_socios (inteiro ou null), \
observacoes (string ou null). \
Se não encontrar um campo, retorne null ou lista vazia. \
Retorne APENAS JSON válido.";

const TEXT_PROMPT_HEADER: &str = "\
Você é um especialista em análise de documentos de planos de saúde.

Analise o documento abaixo e extraia as seguintes informações:
- **idades**: lista de idades dos beneficiários (números inteiros)
- **operadora**: nome da operadora de saúde (ex: AMIL, BRADESCO, SULAMERICA, UNIMED)
- **valor_atual**: valor atual do plano (número decimal, sem símbolo de moeda)
- **tipo_plano**: tipo de plano se mencionado (ADESAO, PME, EMPRESARIAL ou null)
- **nome_beneficiarios**: lista com nomes dos beneficiários se disponíveis
- **socios_detectados**: lista com nomes dos sócios quando o documento for societário (contrato social/alteração contratual)
- **total_socios**: número de sócios identificados quando possível
- **observacoes**: qualquer informação relevante adicional

**IMPORTANTE:**
- Se não encontrar alguma informação, use null
- Para idades, extraia APENAS números
- Para operadora, use o nome em MAIÚSCULAS
- Para valor, use apenas números (ex: 1500.50)
- Para tipo_plano, use somente ADESAO, PME ou EMPRESARIAL

Retorne APENAS um objeto JSON válido, sem texto adicional.

DOCUMENTO:
";

pub fn text_prompt(document_text: &str) -> String {
    format!("{}{}\n\nJSON:\n", TEXT_PROMPT_HEADER, document_text)
}
