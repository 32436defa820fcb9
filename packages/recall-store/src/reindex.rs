use crate::{Error, RecordStore, Result, codec, predicate::Predicate};
use recall_domain::{Record, RecordKind};

const REINDEX_PAGE_SIZE: u64 = 64;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReindexReport {
	pub records: u64,
	pub tokens: u64,
}

impl<K> RecordStore<K>
where
	K: RecordKind,
{
	/// Re-embeds every record's primary text in batches and rewrites its
	/// vector. Metadata and timestamps stay as they are; useful after an
	/// embedding model change behind the same dimension.
	pub async fn reindex_all(&self) -> Result<ReindexReport> {
		let predicate = Predicate::match_all();
		let mut report = ReindexReport::default();
		let mut offset = None;

		loop {
			let page = self.index.scan(&predicate, REINDEX_PAGE_SIZE, offset).await?;
			let mut records = Vec::with_capacity(page.documents.len());

			for document in page.documents {
				records.push(codec::from_payload::<K>(document.payload)?);
			}

			if !records.is_empty() {
				let texts = records.iter().map(Record::primary_text).collect::<Vec<_>>();
				let embeddings = self.embeddings.embed(&self.embedding_cfg, &texts).await?;

				if embeddings.len() != records.len() {
					return Err(Error::EmbeddingFailed {
						message: format!(
							"Embedding provider returned {} vectors for {} records.",
							embeddings.len(),
							records.len()
						),
					});
				}

				for (record, embedding) in records.iter().zip(embeddings) {
					self.check_dim(&embedding.vector)?;
					self.index.upsert(record.id, embedding.vector, codec::to_payload(record)?).await?;

					report.records += 1;
					report.tokens += u64::from(embedding.tokens);
				}
			}

			match page.next {
				Some(next) => offset = Some(next),
				None => break,
			}
		}

		tracing::info!(kind = K::KIND, records = report.records, tokens = report.tokens, "Re-embedded collection.");

		Ok(report)
	}
}
