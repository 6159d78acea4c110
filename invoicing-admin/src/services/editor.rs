//! Detail editor session for a single document.
//!
//! Loading and saving go through the [`DocumentRepository`]; every edit in
//! between is synchronous and only touches the in-memory [`Document`].

use crate::error::EditError;
use crate::models::{
    round_money, Document, DocumentRecord, DocumentTotals, FieldUpdate, LineItem, ProductLabels,
};
use crate::services::metrics::{EDIT_ERRORS_TOTAL, LINE_ITEM_EDITS_TOTAL};
use crate::services::repository::{DocumentRepository, ProductCatalog};
use admin_core::error::AppError;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

pub struct DetailEditor {
    repository: Arc<dyn DocumentRepository>,
    header: DocumentRecord,
    document: Document,
    labels: ProductLabels,
}

impl DetailEditor {
    pub fn new(
        repository: Arc<dyn DocumentRepository>,
        header: DocumentRecord,
        document: Document,
        labels: ProductLabels,
    ) -> Self {
        Self {
            repository,
            header,
            document,
            labels,
        }
    }

    /// Load the header, its details and the product catalog concurrently.
    ///
    /// Stored tax is recomputed from each detail's inputs.
    #[instrument(skip(repository, catalog))]
    pub async fn open(
        repository: Arc<dyn DocumentRepository>,
        catalog: &dyn ProductCatalog,
        document_id: i64,
    ) -> Result<Self, AppError> {
        let (header, records, products) = tokio::try_join!(
            repository.get_document(document_id),
            repository.list_details(document_id),
            catalog.list_products(),
        )?;

        let mut line_items = Vec::with_capacity(records.len());
        for record in &records {
            let item = LineItem::try_from(record).map_err(|e| {
                warn!(detail_id = ?record.id, error = %e, "Stored detail is invalid");
                e
            })?;
            if round_money(record.tax) != item.tax() {
                warn!(
                    detail_id = ?record.id,
                    stored_tax = %record.tax,
                    computed_tax = %item.tax(),
                    "Stored tax disagrees with line inputs, using computed value"
                );
            }
            line_items.push(item);
        }

        let labels = ProductLabels::from_products(&products);
        info!(
            lines = line_items.len(),
            products = labels.len(),
            "Document opened for editing"
        );

        Ok(Self::new(
            repository,
            header,
            Document::from_line_items(line_items),
            labels,
        ))
    }

    pub fn header(&self) -> &DocumentRecord {
        &self.header
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn labels(&self) -> &ProductLabels {
        &self.labels
    }

    pub fn label_for(&self, item: &LineItem) -> &str {
        self.labels.label(item.product_ref())
    }

    pub fn totals(&self) -> Result<DocumentTotals, EditError> {
        self.document.totals()
    }

    #[instrument(skip(self, item), fields(product_ref = %item.product_ref()))]
    pub fn add_line(&mut self, item: LineItem) -> usize {
        if !self.labels.contains(item.product_ref()) {
            debug!("Line references a product missing from the catalog");
        }
        let index = self.document.add_line_item(item);
        LINE_ITEM_EDITS_TOTAL.with_label_values(&["add"]).inc();
        info!(index = index, "Line item added");
        index
    }

    #[instrument(skip(self))]
    pub fn update_line(
        &mut self,
        index: usize,
        update: FieldUpdate,
    ) -> Result<&LineItem, EditError> {
        match self.document.update_line_item(index, update) {
            Ok(item) => {
                LINE_ITEM_EDITS_TOTAL.with_label_values(&["update"]).inc();
                info!(tax = %item.tax(), "Line item updated");
                Ok(item)
            }
            Err(e) => {
                record_rejection(&e);
                Err(e)
            }
        }
    }

    #[instrument(skip(self))]
    pub fn remove_line(&mut self, index: usize) -> Result<LineItem, EditError> {
        match self.document.remove_line_item(index) {
            Ok(item) => {
                LINE_ITEM_EDITS_TOTAL.with_label_values(&["remove"]).inc();
                info!(remaining = self.document.len(), "Line item removed");
                Ok(item)
            }
            Err(e) => {
                record_rejection(&e);
                Err(e)
            }
        }
    }

    /// Write the computed totals and current details into the header and hand
    /// it to the repository.
    #[instrument(skip(self), fields(document_id = ?self.header.id))]
    pub async fn save(&mut self) -> Result<DocumentRecord, AppError> {
        let totals = self.totals()?;

        let mut header = self.header.clone();
        header.apply_totals(&totals);
        header.details = Some(self.document.to_records(header.id));

        let saved = self
            .repository
            .save_document(&header)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to save document");
                e
            })?;

        // Pick up ids the API assigned to new lines.
        if let Some(records) = &saved.details {
            self.document = Document::from_records(records)?;
        }
        self.header = saved.clone();

        info!(
            subtotal = %totals.subtotal,
            total_tax = %totals.total_tax,
            grand_total = %totals.grand_total,
            "Document saved"
        );

        Ok(saved)
    }
}

fn record_rejection(err: &EditError) {
    EDIT_ERRORS_TOTAL
        .with_label_values(&[err.error_type()])
        .inc();
    warn!(error = %err, "Line item edit rejected");
}
