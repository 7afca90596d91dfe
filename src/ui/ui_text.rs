pub struct UiText {
    // --- Window / loading ---
    pub ls_title: &'static str,
    pub ls_loading: &'static str,
    pub ls_failed: &'static str,
    pub ls_retry: &'static str,

    // --- Sidebar ---
    pub sb_title: &'static str,
    pub sb_start_time: &'static str,
    pub sb_key_clients: &'static str,
    pub sb_explanation: &'static str,
    pub sb_explanation_body: &'static str,
    pub sb_col_customer: &'static str,
    pub sb_col_monthly: &'static str,
    pub sb_col_churn: &'static str,
    pub sb_select_customer: &'static str,
    pub sb_no_clients: &'static str,
    pub sb_reload: &'static str,

    // --- Central panel ---
    pub cp_title: &'static str,
    pub cp_customer_info: &'static str,
    pub cp_vs_average: &'static str,
    pub cp_alive_prefix: &'static str,
    pub cp_alive_suffix: &'static str,
    pub cp_history_prefix: &'static str,
    pub cp_select_customer: &'static str,
    pub cp_no_history: &'static str,

    // --- Plots ---
    pub plot_alive_title: &'static str,
    pub plot_alive_y: &'static str,
    pub plot_alive_series: &'static str,
    pub plot_purchases_series: &'static str,
    pub plot_amount_spent: &'static str,
    pub plot_quantity: &'static str,
    pub plot_month: &'static str,
}

pub const UI_TEXT: UiText = UiText {
    ls_title: "Churn prediction",
    ls_loading: "Loading customer data and fitting the churn model...",
    ls_failed: "Could not load data",
    ls_retry: "Retry",

    sb_title: "Parameters",
    sb_start_time: "Last purchase after:",
    sb_key_clients: "Key clients to target:",
    sb_explanation: "See explanation",
    sb_explanation_body: "A client is considered as key to target when their monthly expenses \
                          are high and they are likely to be churning.",
    sb_col_customer: "Customer",
    sb_col_monthly: "Month. exp.",
    sb_col_churn: "Proba churn",
    sb_select_customer: "Select customer to deep dive",
    sb_no_clients: "No customer matches the filters",
    sb_reload: "Reload data",

    cp_title: "Churn prediction",
    cp_customer_info: "info:",
    cp_vs_average: "*vs. average",
    cp_alive_prefix: "Probability that the customer",
    cp_alive_suffix: "is still active over time:",
    cp_history_prefix: "Transaction history of customer",
    cp_select_customer: "Select a customer in the sidebar",
    cp_no_history: "No orders recorded for this customer",

    plot_alive_title: "History of probability of still being a customer",
    plot_alive_y: "P(still customer)",
    plot_alive_series: "P_alive",
    plot_purchases_series: "purchases",
    plot_amount_spent: "Amount spent",
    plot_quantity: "Quantity purchased",
    plot_month: "Month",
};
