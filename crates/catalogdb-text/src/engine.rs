use parking_lot::RwLock;
use tantivy::collector::{Count, TopDocs};
use tantivy::indexer::UserOperation;
use tantivy::query::{BooleanQuery, FuzzyTermQuery, Occur, Query, TermQuery};
use tantivy::schema::{Field, IndexRecordOption, Value};
use tantivy::snippet::SnippetGenerator;
use tantivy::tokenizer::TokenStream;
use tantivy::{doc, Index, IndexReader, IndexWriter, ReloadPolicy, TantivyDocument, Term};
use tracing::{debug, info};

use catalogdb_core::config::EngineConfig;
use catalogdb_core::traits::{TextEngine, WriteBatch};
use catalogdb_core::types::{FuzzyRequest, Record, SearchHit, SearchPage};
use catalogdb_core::EngineError;

use crate::tantivy_utils::{build_schema, register_tokenizers, CatalogFields};

fn schema_err(e: impl std::fmt::Display) -> EngineError { EngineError::Schema(e.to_string()) }
fn write_err(e: impl std::fmt::Display) -> EngineError { EngineError::Write(e.to_string()) }
fn search_err(e: impl std::fmt::Display) -> EngineError { EngineError::Search(e.to_string()) }

/// Documents queued for one grouped `IndexWriter::run`.
pub struct TantivyBatch {
	fields: CatalogFields,
	ops: Vec<UserOperation>,
}

impl WriteBatch for TantivyBatch {
	fn add(&mut self, key: String, record: &Record) {
		let doc = doc!(
			self.fields.id => key,
			self.fields.name => record.name.clone(),
			self.fields.category => record.category.clone(),
		);
		self.ops.push(UserOperation::Add(doc));
	}

	fn len(&self) -> usize { self.ops.len() }
}

/// Catalog text index on tantivy.
///
/// Batches from many threads are applied concurrently under the read side of
/// the writer lock; `commit` takes the write side and reloads the reader so
/// the new segments become searchable. `close` drops the writer, after which
/// writes fail with [`EngineError::Closed`].
pub struct TantivyEngine {
	index: Index,
	fields: CatalogFields,
	writer: RwLock<Option<IndexWriter>>,
	reader: IndexReader,
}

impl TantivyEngine {
	pub fn open(config: &EngineConfig) -> Result<Self, EngineError> {
		let (schema, fields) = build_schema(&config.name_analyzer, &config.category_analyzer)?;
		let index = match config.index_path() {
			Some(index_dir) => {
				if index_dir.exists() { std::fs::remove_dir_all(&index_dir).map_err(schema_err)?; }
				std::fs::create_dir_all(&index_dir).map_err(schema_err)?;
				info!(path = %index_dir.display(), "creating on-disk catalog index");
				Index::create_in_dir(&index_dir, schema).map_err(schema_err)?
			}
			None => {
				info!("creating in-memory catalog index");
				Index::create_in_ram(schema)
			}
		};
		register_tokenizers(&index);
		let writer: IndexWriter = index.writer(config.writer_memory_bytes).map_err(schema_err)?;
		let reader = index.reader_builder().reload_policy(ReloadPolicy::Manual).try_into().map_err(schema_err)?;
		Ok(Self { index, fields, writer: RwLock::new(Some(writer)), reader })
	}

	pub fn in_memory() -> Result<Self, EngineError> { Self::open(&EngineConfig::default()) }

	fn analyze(&self, field: Field, text: &str) -> Result<Vec<String>, EngineError> {
		let mut analyzer = self.index.tokenizer_for_field(field).map_err(search_err)?;
		let mut stream = analyzer.token_stream(text);
		let mut tokens = Vec::new();
		while stream.advance() { tokens.push(stream.token().text.clone()); }
		Ok(tokens)
	}

	/// Each whitespace-separated word must match (exactly or within
	/// `distance` edits) in `name` or `category`. Exact clauses add their
	/// BM25 score on top of the fuzzy one, so exact matches rank first.
	fn fuzzy_query(&self, text: &str, distance: u8) -> Result<Option<Box<dyn Query>>, EngineError> {
		let mut word_queries: Vec<(Occur, Box<dyn Query>)> = Vec::new();
		for word in text.split_whitespace() {
			let mut clauses: Vec<(Occur, Box<dyn Query>)> = Vec::new();
			for field in [self.fields.name, self.fields.category] {
				for token in self.analyze(field, word)? {
					let term = Term::from_field_text(field, &token);
					let exact: Box<dyn Query> = Box::new(TermQuery::new(term.clone(), IndexRecordOption::WithFreqs));
					clauses.push((Occur::Should, exact));
					if distance > 0 {
						let fuzzy: Box<dyn Query> = Box::new(FuzzyTermQuery::new(term, distance, true));
						clauses.push((Occur::Should, fuzzy));
					}
				}
			}
			if !clauses.is_empty() {
				let word_query: Box<dyn Query> = Box::new(BooleanQuery::new(clauses));
				word_queries.push((Occur::Must, word_query));
			}
		}
		Ok(match word_queries.len() {
			0 => None,
			1 => word_queries.pop().map(|(_, q)| q),
			_ => Some(Box::new(BooleanQuery::new(word_queries)) as Box<dyn Query>),
		})
	}
}

impl TextEngine for TantivyEngine {
	type Batch = TantivyBatch;

	fn begin_batch(&self) -> TantivyBatch { TantivyBatch { fields: self.fields, ops: Vec::new() } }

	fn submit_batch(&self, batch: TantivyBatch) -> Result<(), EngineError> {
		let guard = self.writer.read();
		let writer = guard.as_ref().ok_or(EngineError::Closed)?;
		writer.run(batch.ops).map_err(write_err)?;
		Ok(())
	}

	fn commit(&self) -> Result<(), EngineError> {
		let mut guard = self.writer.write();
		let writer = guard.as_mut().ok_or(EngineError::Closed)?;
		let opstamp = writer.commit().map_err(write_err)?;
		drop(guard);
		self.reader.reload().map_err(search_err)?;
		debug!(opstamp, "catalog index committed");
		Ok(())
	}

	fn search(&self, request: &FuzzyRequest) -> Result<SearchPage, EngineError> {
		let Some(query) = self.fuzzy_query(&request.text, request.fuzziness)? else { return Ok(SearchPage::default()) };
		let searcher = self.reader.searcher();
		let (top_docs, total) = searcher.search(&*query, &(TopDocs::with_limit(request.page_size.max(1)), Count)).map_err(search_err)?;
		let snippets = if request.highlight {
			Some((
				SnippetGenerator::create(&searcher, &*query, self.fields.name).map_err(search_err)?,
				SnippetGenerator::create(&searcher, &*query, self.fields.category).map_err(search_err)?,
			))
		} else { None };
		let mut hits = Vec::with_capacity(top_docs.len());
		for (score, doc_address) in top_docs {
			let doc: TantivyDocument = searcher.doc(doc_address).map_err(search_err)?;
			let key = doc.get_first(self.fields.id).and_then(|v| v.as_str()).unwrap_or_default().to_string();
			let highlights = match &snippets {
				Some((name, category)) => [name.snippet_from_doc(&doc), category.snippet_from_doc(&doc)]
					.into_iter()
					.filter(|s| !s.is_empty())
					.map(|s| s.to_html())
					.collect(),
				None => Vec::new(),
			};
			hits.push(SearchHit { key, score, highlights });
		}
		Ok(SearchPage { hits, total })
	}

	fn contains_key(&self, key: &str) -> Result<bool, EngineError> {
		let query = TermQuery::new(Term::from_field_text(self.fields.id, key), IndexRecordOption::Basic);
		let count = self.reader.searcher().search(&query, &Count).map_err(search_err)?;
		Ok(count > 0)
	}

	fn doc_count(&self) -> Result<u64, EngineError> { Ok(self.reader.searcher().num_docs()) }

	fn close(&self) -> Result<(), EngineError> {
		let writer = self.writer.write().take();
		match writer {
			Some(writer) => {
				writer.wait_merging_threads().map_err(write_err)?;
				info!("catalog index closed");
				Ok(())
			}
			None => Ok(()),
		}
	}
}
