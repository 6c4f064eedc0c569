//! Pipeline building blocks shared by the three stages.
//!
//! Each submodule implements exactly one transformation and is free of
//! filesystem side effects except [`store`].
//!
//! ## Data Flow
//!
//! ```text
//! csvs/*.csv ──▶ normalize ──▶ store ──┬──▶ page ──▶ public/product/{id}.html
//!               (columns, ids)         └──▶ qr   ──▶ public/qr-codes/{id}.{svg,png}
//! ```
//!
//! 1. [`columns`]   — declarative header spellings per record field
//! 2. [`ids`]       — slugging and the run-local id counter
//! 3. [`normalize`] — CSV bytes → records, dropping nameless rows
//! 4. [`store`]     — JSON canonical store read/write
//! 5. [`page`]      — record → HTML detail page, records → QR index
//! 6. [`qr`]        — product URL → SVG + PNG

pub mod columns;
pub mod ids;
pub mod normalize;
pub mod page;
pub mod qr;
pub mod store;
