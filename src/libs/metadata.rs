//! Build-time application metadata generated by `build.rs`.

include!(concat!(env!("OUT_DIR"), "/app_metadata.rs"));
