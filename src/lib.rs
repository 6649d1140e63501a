pub mod apriori;
pub mod config;
pub mod error;
pub mod pipeline;

pub use apriori::{mine, AssociationRule, FrequentTable, Itemset, MiningOutcome, TransactionSet};
pub use config::{MiningConfig, PipelineConfig, SupportStrategy};
pub use error::{MiningError, Result};

#[cfg(feature = "python")]
mod python {
    use crate::apriori::{self, mine_frequent_itemsets, projection, Itemset, TransactionSet};
    use crate::config::MiningConfig;
    use numpy::{IntoPyArray, PyArray2, PyReadonlyArray2};
    use pyo3::{pymodule, types::PyModule, Bound, PyResult, Python};

    type RuleTuple = (Vec<String>, Vec<String>, f64, f64, f64);

    fn labels(transactions: &TransactionSet, itemset: &Itemset) -> Vec<String> {
        transactions
            .labels_of(itemset)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    fn to_py_err(err: crate::MiningError) -> pyo3::PyErr {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }

    #[pymodule]
    fn apriori_rules<'py>(m: &Bound<'py, PyModule>) -> PyResult<()> {
        #[pyfn(m)]
        #[pyo3(name = "apriori")]
        fn apriori_py<'py>(
            py: Python<'py>,
            transactions: PyReadonlyArray2<'py, i32>,
            min_support: f64,
        ) -> PyResult<Vec<Bound<'py, PyArray2<usize>>>> {
            let transactions = TransactionSet::from_matrix(transactions.as_array());
            let config = MiningConfig {
                min_support,
                ..MiningConfig::default()
            };
            config.validate().map_err(to_py_err)?;
            let table = mine_frequent_itemsets(&transactions, &config).map_err(to_py_err)?;

            Ok(table
                .levels()
                .iter()
                .filter(|level| !level.is_empty())
                .map(|level| level.to_matrix().into_pyarray(py))
                .collect())
        }

        #[pyfn(m)]
        #[pyo3(name = "association_rules")]
        fn association_rules_py(
            transactions: Vec<Vec<String>>,
            min_support: f64,
            min_confidence: f64,
            min_lift: f64,
        ) -> PyResult<Vec<RuleTuple>> {
            let transactions = TransactionSet::from_records(transactions);
            let config = MiningConfig::new(min_support, min_confidence, min_lift);
            let outcome = apriori::mine(&transactions, &config).map_err(to_py_err)?;

            Ok(projection::rules_by_lift(&outcome.rules.rules)
                .into_iter()
                .map(|rule| {
                    (
                        labels(&transactions, &rule.antecedent),
                        labels(&transactions, &rule.consequent),
                        projection::round4(rule.support),
                        projection::round4(rule.confidence),
                        projection::round4(rule.lift),
                    )
                })
                .collect())
        }

        Ok(())
    }
}
