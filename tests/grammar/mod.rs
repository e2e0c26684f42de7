mod tests_highlight;
mod tests_language;
