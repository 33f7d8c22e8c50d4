mod assemble_test;

use ka_testutils::*;
use rstest::*;
use tracing_test::traced_test;

use super::*;
use crate::fetch::{
    FetchError,
    ResourceChannel,
};
