mod tests_ast;
mod tests_attributes;
mod tests_expressions;
mod tests_recovery;
mod tests_reparse;
