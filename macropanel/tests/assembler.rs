mod helpers;

#[path = "assembler/builder_validation.rs"]
mod builder_validation;
#[path = "assembler/end_to_end.rs"]
mod end_to_end;
#[path = "assembler/index_and_renames.rs"]
mod index_and_renames;
#[path = "assembler/omitted_sources.rs"]
mod omitted_sources;
#[path = "assembler/timeouts.rs"]
mod timeouts;
