pub mod formatter;
pub mod writer;

pub use formatter::{
    format_json, format_number, format_product_list, format_ranking_detail, format_ranking_table,
    format_score, format_tsv, format_user_list, format_weights, should_use_colors,
};
pub use writer::{print_line, write_line};
