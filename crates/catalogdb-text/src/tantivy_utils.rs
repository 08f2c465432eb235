use tantivy::schema::{Field, IndexRecordOption, Schema, TextFieldIndexing, TextOptions, STORED, STRING};
use tantivy::tokenizer::{Language, LowerCaser, RawTokenizer, RemoveLongFilter, SimpleTokenizer, Stemmer, StopWordFilter, TextAnalyzer};
use tantivy::Index;

use catalogdb_core::EngineError;

pub const ID_FIELD: &str = "id";
pub const NAME_FIELD: &str = "name";
pub const CATEGORY_FIELD: &str = "category";

/// Analyzers selectable per field in `EngineConfig`, with the tokenizer
/// name each one is registered under.
const ANALYZERS: &[(&str, &str)] = &[
	("standard", "catalog_standard"),
	("keyword", "catalog_keyword"),
	("english", "catalog_english"),
];

#[derive(Debug, Clone, Copy)]
pub struct CatalogFields {
	pub id: Field,
	pub name: Field,
	pub category: Field,
}

pub fn tokenizer_for(field: &str, analyzer: &str) -> Result<&'static str, EngineError> {
	ANALYZERS
		.iter()
		.find(|(name, _)| *name == analyzer)
		.map(|(_, tokenizer)| *tokenizer)
		.ok_or_else(|| EngineError::Analyzer { field: field.to_string(), analyzer: analyzer.to_string() })
}

fn analyzed_text(tokenizer: &str) -> TextOptions {
	let indexing = TextFieldIndexing::default().set_tokenizer(tokenizer).set_index_option(IndexRecordOption::WithFreqsAndPositions);
	TextOptions::default().set_indexing_options(indexing).set_stored()
}

pub fn build_schema(name_analyzer: &str, category_analyzer: &str) -> Result<(Schema, CatalogFields), EngineError> {
	let name_tokenizer = tokenizer_for(NAME_FIELD, name_analyzer)?;
	let category_tokenizer = tokenizer_for(CATEGORY_FIELD, category_analyzer)?;
	let mut schema_builder = Schema::builder();
	let id = schema_builder.add_text_field(ID_FIELD, STRING | STORED);
	let name = schema_builder.add_text_field(NAME_FIELD, analyzed_text(name_tokenizer));
	let category = schema_builder.add_text_field(CATEGORY_FIELD, analyzed_text(category_tokenizer));
	Ok((schema_builder.build(), CatalogFields { id, name, category }))
}

pub fn register_tokenizers(index: &Index) {
	let stop_words = vec![
		"a","an","and","are","as","at","be","by","for","from","has","he","in","is","it","its","of","on","that","the","to","was","will","with","or","but","not","this","these","they","them","their","there","then","than","so","if","when","where","why","how","what","which","who","whom","whose","can","could","should","would","may","might","must","shall","do","does","did","have","had","having",
	];
	let standard = TextAnalyzer::builder(SimpleTokenizer::default())
		.filter(RemoveLongFilter::limit(40))
		.filter(LowerCaser)
		.build();
	let keyword = TextAnalyzer::builder(RawTokenizer::default())
		.filter(LowerCaser)
		.build();
	let english = TextAnalyzer::builder(SimpleTokenizer::default())
		.filter(RemoveLongFilter::limit(40))
		.filter(LowerCaser)
		.filter(StopWordFilter::remove(stop_words.into_iter().map(|s| s.to_string())))
		.filter(Stemmer::new(Language::English))
		.build();
	let tokenizers = index.tokenizers();
	tokenizers.register("catalog_standard", standard);
	tokenizers.register("catalog_keyword", keyword);
	tokenizers.register("catalog_english", english);
}
