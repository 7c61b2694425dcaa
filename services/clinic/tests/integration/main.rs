mod helpers;

mod mapping_test;
mod patient_test;
