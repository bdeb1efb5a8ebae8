mod generators;
mod scenarios;
mod word_count;
