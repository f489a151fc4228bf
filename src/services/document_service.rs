// src/services/document_service.rs

use chrono::NaiveDate;
use genpdf::{elements, style, Element};
use image::Luma;
use qrcode::QrCode;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{common::error::AppError, db::FinanceRepository};

#[derive(Clone)]
pub struct DocumentService {
    finance_repo: FinanceRepository,
}

impl DocumentService {
    pub fn new(finance_repo: FinanceRepository) -> Self {
        Self { finance_repo }
    }

    /// Gera o PDF do extrato de uma conta no período, com saldo corrente.
    pub async fn generate_statement_pdf(
        &self,
        account_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<u8>, AppError> {
        // 1. Busca os dados
        let account = self
            .finance_repo
            .find_account(account_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Conta".to_string()))?;

        let movements = self.finance_repo.list_movements(account_id, from, to).await?;

        // 2. Configura o PDF (fonte carregada da pasta 'fonts/')
        let font_family = genpdf::fonts::from_files("./fonts", "Roboto", None)
            .map_err(|_| AppError::FontNotFound("Fonte não encontrada na pasta ./fonts".to_string()))?;

        let mut doc = genpdf::Document::new(font_family);
        doc.set_title(format!("Extrato {} {}", account.branch, account.account_number));
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(10);
        doc.set_page_decorator(decorator);

        // --- CABEÇALHO ---
        doc.push(
            elements::Paragraph::new("AUTOESCOLA IDEAL")
                .styled(style::Style::new().bold().with_font_size(18)),
        );
        doc.push(elements::Paragraph::new(format!(
            "Extrato — {} / Ag. {} / Conta {}",
            account.bank_name, account.branch, account.account_number
        )));
        doc.push(elements::Paragraph::new(format!("Unidade: {}", account.unit)));
        doc.push(
            elements::Paragraph::new(format!("Período: {} a {}", from, to))
                .styled(style::Style::new().with_font_size(10)),
        );
        doc.push(elements::Break::new(2));

        // --- TABELA DE MOVIMENTOS ---
        // Pesos das colunas: Data (2), Descrição (5), Valor (2), Saldo (2)
        let mut table = elements::TableLayout::new(vec![2, 5, 2, 2]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

        let style_bold = style::Style::new().bold();
        table
            .row()
            .element(elements::Paragraph::new("Data").styled(style_bold))
            .element(elements::Paragraph::new("Descrição").styled(style_bold))
            .element(elements::Paragraph::new("Valor").styled(style_bold))
            .element(elements::Paragraph::new("Saldo").styled(style_bold))
            .push()
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        let mut balance = Decimal::ZERO;
        for movement in &movements {
            balance += movement.amount;
            table
                .row()
                .element(elements::Paragraph::new(movement.movement_date.to_string()))
                .element(elements::Paragraph::new(movement.description.clone()))
                .element(elements::Paragraph::new(format!("R$ {:.2}", movement.amount)))
                .element(elements::Paragraph::new(format!("R$ {:.2}", balance)))
                .push()
                .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;
        }

        doc.push(table);
        doc.push(elements::Break::new(2));

        let mut total_paragraph =
            elements::Paragraph::new(format!("SALDO DO PERÍODO: R$ {:.2}", balance));
        total_paragraph.set_alignment(genpdf::Alignment::Right);
        doc.push(total_paragraph.styled(style::Style::new().bold().with_font_size(12)));

        // 3. Renderiza para buffer em memória
        let mut buffer = Vec::new();
        doc.render(&mut buffer)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        Ok(buffer)
    }

    /// PNG do QR Code de pagamento de uma cobrança. Usa a linha digitável
    /// quando houver; senão, a chave PIX da conta.
    /// Obs: para o "Pix Copia e Cola" oficial (BR Code EMV) seria preciso
    /// montar o payload TLV; aqui vai o texto simples, como no fluxo atual.
    pub async fn generate_charge_qr_png(&self, charge_id: Uuid) -> Result<Vec<u8>, AppError> {
        let charge = self
            .finance_repo
            .find_charge(charge_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Cobrança".to_string()))?;

        let payload = match &charge.digitable_line {
            Some(line) => line.clone(),
            None => {
                let account = self
                    .finance_repo
                    .find_account(charge.account_id)
                    .await?
                    .ok_or_else(|| AppError::NotFound("Conta".to_string()))?;

                let pix_key = account.pix_key.ok_or_else(|| {
                    AppError::NotFound("Chave PIX da conta".to_string())
                })?;

                format!("PIX {} R$ {:.2}", pix_key, charge.amount)
            }
        };

        let code = QrCode::new(payload.as_bytes())
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        let image_buffer = code.render::<Luma<u8>>().build();
        let dynamic_image = image::DynamicImage::ImageLuma8(image_buffer);

        let mut png_bytes = Vec::new();
        dynamic_image
            .write_to(&mut png_bytes, image::ImageOutputFormat::Png)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        Ok(png_bytes)
    }
}
