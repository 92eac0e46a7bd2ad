/// Archive adapter producing tar + bzip2 bundles
mod tar_bz2_writer;

pub use tar_bz2_writer::TarBz2Writer;
