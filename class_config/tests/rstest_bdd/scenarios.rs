//! Binds the behavioural feature files to the step registry.

use crate::fixtures::{
    ExtendsContext, MergeContext, SafelistContext, extends_context, merge_context,
    safelist_context,
};
use rstest_bdd_macros::scenarios;

scenarios!(
    "tests/features/config_merge.feature",
    fixtures = [merge_context: MergeContext]
);
scenarios!(
    "tests/features/extends.feature",
    fixtures = [extends_context: ExtendsContext]
);
scenarios!(
    "tests/features/safelist.feature",
    fixtures = [safelist_context: SafelistContext]
);
