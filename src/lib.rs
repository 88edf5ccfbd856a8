pub mod sample;
pub mod table;
pub mod template;
pub mod workbook;
