mod account_test;
mod helpers;
mod ledger_test;
mod report_test;
mod roster_test;
