pub mod u001_reconcile_award_options;
