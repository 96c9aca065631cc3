//! Demo data: a fixed batch of sample emails run through the full
//! analyze-and-save path. Handy for exercising the dashboard against a
//! fresh database.

use log::{info, warn};
use sqlx::SqlitePool;

use crate::analyzer::analyze;
use crate::normalization::EmailInput;
use crate::store::{save_analysis, StoreError};

fn sample(sender_email: &str, sender_name: &str, subject: &str, body: &str) -> EmailInput {
    EmailInput {
        sender_email: sender_email.to_string(),
        sender_name: sender_name.to_string(),
        subject: subject.to_string(),
        body: body.to_string(),
    }
}

/// A mix of legitimate mail and obvious spam so every list filter has
/// something to show.
fn sample_emails() -> Vec<EmailInput> {
    vec![
        sample(
            "newsletter@techcompany.com",
            "Tech Company Weekly",
            "Your Weekly Tech Newsletter",
            "Hello,\n\nHere are this week's top stories in technology:\n\n1. New AI breakthrough announced\n2. Cloud computing trends for 2024\n3. Cybersecurity best practices\n\nStay informed!\n\nBest regards,\nTech Company Team",
        ),
        sample(
            "winner9999@tempmail.com",
            "",
            "CONGRATULATIONS!!! YOU WON $5,000,000 LOTTERY!!!",
            "URGENT! ACT NOW! You are the LUCKY WINNER of our international lottery! Claim your $5,000,000 prize NOW!\n\nClick here: http://fake-lottery-site.com/claim\nClick here: http://suspicious-winner.com/prize\nClick here: http://scam-alert.com/money\n\nLimited time offer! FREE MONEY! No risk! Satisfaction guaranteed!\n\nDon't miss this once in lifetime opportunity!",
        ),
        sample(
            "security@paypal-verify.net",
            "",
            "URGENT: Account Suspended - Verify Identity NOW!!!",
            "Your PayPal account has been suspended due to unusual activity!!!\n\nVerify your identity immediately or your account will be permanently deleted!\n\nClick here to verify: http://fake-paypal.com/verify\n\nACT NOW! Time is running out!",
        ),
        sample(
            "business-opportunity@workfromhome.biz",
            "Financial Freedom Team",
            "Make $10,000 per week from home! No experience needed!",
            "Earn extra cash working from home! Make money fast! Increase your income today!\n\nGuaranteed $10,000 per week! No risk! Free consultation available!\n\nClick here to get started: http://make-money-now.com\n\nLimited time offer! Call now! Apply now! Become a member today!",
        ),
        sample(
            "sarah.johnson@company.com",
            "Sarah Johnson",
            "Project update and next steps",
            "Hi team,\n\nI wanted to share a quick update on our current project. We've completed phase 1 and are moving into phase 2 next week.\n\nKey accomplishments:\n- Feature A is complete\n- Testing is underway\n- Documentation updated\n\nNext steps:\n- Begin phase 2 implementation\n- Schedule review meeting\n- Update stakeholders\n\nLet me know if you have any questions.\n\nBest,\nSarah",
        ),
        sample(
            "pharmacy-deals-4321@guerrillamail.com",
            "",
            "Cheap Viagra and prescription medication - 90% OFF!!!",
            "Get your prescription medication at unbelievable prices!\n\nViagra - 90% OFF\nPills and pharmacy products - FREE SHIPPING\n\nNo prescription needed! Order now!\n\nhttp://cheap-pharmacy.com\nhttp://discount-meds.com\nhttp://buy-pills-now.com",
        ),
        sample(
            "support@github.com",
            "GitHub Support",
            "Your pull request has been merged",
            "Hello,\n\nYour pull request #1234 \"Fix authentication bug\" has been successfully merged into the main branch.\n\nThank you for your contribution!\n\nGitHub Team",
        ),
        sample(
            "prince-abdullah@nigeria-royalty.com",
            "",
            "Urgent Business Proposal - $25 Million Inheritance",
            "Dear Friend,\n\nI am Prince Abdullah from Nigeria. I have an urgent business proposal involving $25 million dollars inheritance that I need to transfer out of the country.\n\nI need your help as a trusted partner. You will receive 40% of the total amount ($10 million dollars) for your assistance.\n\nPlease send your bank account details immediately.\n\nThis is a limited time offer! Act now!\n\nPrince Abdullah",
        ),
        sample(
            "alerts@bank.com",
            "Bank Security Team",
            "Monthly statement available",
            "Dear Customer,\n\nYour monthly bank statement for January 2024 is now available in your online banking portal.\n\nTo view your statement, please log in to your account.\n\nThank you for banking with us.\n\nBank Security Team",
        ),
        sample(
            "amazing-deals-xyz@10minutemail.com",
            "Casino Promotions",
            "FREE $1000 Casino Bonus - Play Now and Win!!!",
            "Get your FREE $1000 casino bonus today! No deposit required!\n\nPlay slots, poker, and more! Guaranteed wins! Easy money!\n\nClick here: http://free-casino.com\nClick here: http://bonus-slots.com\nClick here: http://win-money-now.com\n\nLimited time! Act now! Don't miss out! Free gift! Special promotion!",
        ),
    ]
}

/// Analyze and store every sample. Individual failures are logged and
/// skipped so one bad insert does not abort the batch.
pub async fn seed(pool: &SqlitePool) -> Result<usize, StoreError> {
    let samples = sample_emails();
    let total = samples.len();
    let mut seeded = 0;

    info!("Seeding {total} sample emails");
    for (index, input) in samples.iter().enumerate() {
        let analysis = analyze(input);
        match save_analysis(pool, input, &analysis).await {
            Ok(record) => {
                info!(
                    "Seeded {}/{}: \"{}\" (score={}, spam={})",
                    index + 1,
                    total,
                    record.subject,
                    record.spam_score,
                    record.is_spam
                );
                seeded += 1;
            }
            Err(err) => warn!("Failed to seed email {}/{}: {err}", index + 1, total),
        }
    }

    Ok(seeded)
}
