// src/services/relatorio_service.rs

use std::path::PathBuf;

use genpdf::{elements, style, Element};
use image::Luma;
use qrcode::QrCode;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{EmpresaRepository, OcorrenciaRepository, PercursoRepository, PontoRondaRepository, RondaRepository},
    models::{
        empresa::Empresa,
        ocorrencia::Ocorrencia,
        percurso::{Percurso, VigiaEscalado},
        ronda::Ronda,
    },
};

const FONT_FAMILY: &str = "Roboto";

// Tudo o que o PDF precisa, já carregado do banco
struct DadosRelatorio {
    percurso: Percurso,
    ronda: Ronda,
    empresa: Option<Empresa>,
    vigias: Vec<VigiaEscalado>,
    ocorrencias: Vec<Ocorrencia>,
}

#[derive(Clone)]
pub struct RelatorioService {
    percurso_repo: PercursoRepository,
    ronda_repo: RondaRepository,
    empresa_repo: EmpresaRepository,
    ocorrencia_repo: OcorrenciaRepository,
    ponto_repo: PontoRondaRepository,
    pool: PgPool,
    fonts_dir: PathBuf,
}

impl RelatorioService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        percurso_repo: PercursoRepository,
        ronda_repo: RondaRepository,
        empresa_repo: EmpresaRepository,
        ocorrencia_repo: OcorrenciaRepository,
        ponto_repo: PontoRondaRepository,
        pool: PgPool,
        fonts_dir: PathBuf,
    ) -> Self {
        Self { percurso_repo, ronda_repo, empresa_repo, ocorrencia_repo, ponto_repo, pool, fonts_dir }
    }

    /// PNG com o QR Code que o vigia lê ao passar pelo ponto.
    pub async fn qrcode_do_ponto(&self, ponto_id: Uuid) -> Result<Vec<u8>, AppError> {
        let ponto = self
            .ponto_repo
            .find_by_id(ponto_id)
            .await?
            .ok_or(AppError::NotFound("ponto_ronda"))?;

        qrcode_png(&ponto.qrcode)
    }

    pub async fn relatorio_percurso(&self, percurso_id: Uuid) -> Result<Vec<u8>, AppError> {
        // 1. Busca os Dados (numa transação, para uma leitura consistente)
        let mut tx = self.pool.begin().await?;

        let percurso = self
            .percurso_repo
            .find_by_id(&mut *tx, percurso_id)
            .await?
            .ok_or(AppError::NotFound("percurso"))?;
        let ronda = self
            .ronda_repo
            .find_by_id(&mut *tx, percurso.ronda_id)
            .await?
            .ok_or(AppError::NotFound("ronda"))?;
        let vigias = self.percurso_repo.list_vigias(&mut *tx, percurso_id).await?;
        let ocorrencias = self
            .ocorrencia_repo
            .list_by_percurso(&mut *tx, percurso_id)
            .await?;

        tx.commit().await?;

        let empresa = self.empresa_repo.find_by_id(ronda.empresa_id).await?;

        let dados = DadosRelatorio { percurso, ronda, empresa, vigias, ocorrencias };
        let fonts_dir = self.fonts_dir.clone();

        // 2. Monta o PDF fora do runtime: carregar fontes e renderizar é bloqueante
        tokio::task::spawn_blocking(move || montar_pdf(&dados, &fonts_dir))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task do relatório: {}", e))?
    }
}

pub fn qrcode_png(conteudo: &str) -> Result<Vec<u8>, AppError> {
    let code = QrCode::new(conteudo.as_bytes())
        .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

    let image_buffer = code.render::<Luma<u8>>().min_dimensions(256, 256).build();
    let mut png = Vec::new();
    image::DynamicImage::ImageLuma8(image_buffer)
        .write_to(&mut png, image::ImageOutputFormat::Png)
        .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

    Ok(png)
}

fn pdf_error(e: genpdf::error::Error) -> AppError {
    AppError::InternalServerError(anyhow::Error::msg(e.to_string()))
}

fn montar_pdf(dados: &DadosRelatorio, fonts_dir: &std::path::Path) -> Result<Vec<u8>, AppError> {
    let font_family = genpdf::fonts::from_files(fonts_dir, FONT_FAMILY, None)
        .map_err(|_| AppError::FontNotFound(format!("{} em {}", FONT_FAMILY, fonts_dir.display())))?;

    let percurso = &dados.percurso;

    let mut doc = genpdf::Document::new(font_family);
    doc.set_title(format!("Percurso {}", percurso.id));
    let mut decorator = genpdf::SimplePageDecorator::new();
    decorator.set_margins(10);
    doc.set_page_decorator(decorator);

    // --- CABEÇALHO ---
    let titulo = dados
        .empresa
        .as_ref()
        .map(|e| e.nome.clone())
        .unwrap_or_else(|| "RELATÓRIO DE RONDA".to_string());
    doc.push(elements::Paragraph::new(titulo).styled(style::Style::new().bold().with_font_size(18)));

    if let Some(empresa) = &dados.empresa {
        doc.push(
            elements::Paragraph::new(format!("CNPJ: {}", empresa.cnpj))
                .styled(style::Style::new().with_font_size(10)),
        );
    }

    doc.push(elements::Break::new(1.5));
    doc.push(
        elements::Paragraph::new(format!("RONDA: {} ({})", dados.ronda.nome, dados.ronda.periodo))
            .styled(style::Style::new().bold().with_font_size(14)),
    );

    let fim = percurso
        .data_fim
        .map(|d| d.format("%d/%m/%Y %H:%M").to_string())
        .unwrap_or_else(|| "em andamento".to_string());
    doc.push(elements::Paragraph::new(format!(
        "Início: {}   Fim: {}",
        percurso.data_inicio.format("%d/%m/%Y %H:%M"),
        fim
    )));

    if let Some(km) = percurso.km_percorrido {
        doc.push(elements::Paragraph::new(format!("Distância percorrida: {:.2} km", km)));
    }
    doc.push(elements::Paragraph::new(format!(
        "Pontos previstos: {}   Tempo estimado: {} min",
        dados.ronda.sequencia_pontos.len(),
        dados.ronda.tempo_estimado
    )));

    let nomes: Vec<&str> = dados.vigias.iter().map(|v| v.nome.as_str()).collect();
    let escala = if nomes.is_empty() { "nenhum".to_string() } else { nomes.join(", ") };
    doc.push(elements::Paragraph::new(format!("Vigias: {}", escala)));

    if let Some(obs) = &percurso.observacoes {
        doc.push(elements::Paragraph::new(format!("Observações: {}", obs)));
    }

    doc.push(elements::Break::new(2));

    // --- TABELA DE OCORRÊNCIAS ---
    doc.push(
        elements::Paragraph::new(format!("OCORRÊNCIAS ({})", dados.ocorrencias.len()))
            .styled(style::Style::new().bold().with_font_size(12)),
    );

    if dados.ocorrencias.is_empty() {
        doc.push(elements::Paragraph::new("Nenhuma ocorrência registrada.").styled(style::Style::new().italic()));
    } else {
        // Pesos das colunas: Data (2), Hora (1), Tipo (2), Descrição (5)
        let mut table = elements::TableLayout::new(vec![2, 1, 2, 5]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

        let style_bold = style::Style::new().bold();
        table
            .row()
            .element(elements::Paragraph::new("Data").styled(style_bold))
            .element(elements::Paragraph::new("Hora").styled(style_bold))
            .element(elements::Paragraph::new("Tipo").styled(style_bold))
            .element(elements::Paragraph::new("Descrição").styled(style_bold))
            .push()
            .map_err(pdf_error)?;

        for ocorrencia in &dados.ocorrencias {
            // SOS em destaque
            let estilo = if ocorrencia.sos { style::Style::new().bold() } else { style::Style::new() };
            let tipo = if ocorrencia.sos {
                format!("SOS - {}", ocorrencia.tipo)
            } else {
                ocorrencia.tipo.clone()
            };

            table
                .row()
                .element(elements::Paragraph::new(ocorrencia.data.format("%d/%m/%Y").to_string()).styled(estilo))
                .element(elements::Paragraph::new(ocorrencia.hora.format("%H:%M").to_string()).styled(estilo))
                .element(elements::Paragraph::new(tipo).styled(estilo))
                .element(elements::Paragraph::new(ocorrencia.descricao.clone()).styled(estilo))
                .push()
                .map_err(pdf_error)?;
        }

        doc.push(table);
    }

    // 3. Renderiza para Buffer (Memória)
    let mut buffer = Vec::new();
    doc.render(&mut buffer).map_err(pdf_error)?;

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qrcode_is_rendered_as_png() {
        let png = qrcode_png("PORTARIA-001").unwrap();
        assert!(png.len() > 8);
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn missing_font_directory_is_reported() {
        let dados = DadosRelatorio {
            percurso: Percurso {
                id: Uuid::new_v4(),
                data_inicio: chrono::Utc::now(),
                data_fim: None,
                km_percorrido: None,
                observacoes: None,
                ronda_id: Uuid::new_v4(),
            },
            ronda: Ronda {
                id: Uuid::new_v4(),
                nome: "Ronda A".into(),
                sequencia_pontos: vec![],
                tempo_estimado: 30,
                periodo: "Noturno".into(),
                empresa_id: Uuid::new_v4(),
                administrador_id: None,
            },
            empresa: None,
            vigias: vec![],
            ocorrencias: vec![],
        };

        let resultado = montar_pdf(&dados, std::path::Path::new("/caminho/que/nao/existe"));
        assert!(matches!(resultado, Err(AppError::FontNotFound(_))));
    }
}
